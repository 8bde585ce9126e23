use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::{Value, json};

use super::client::SearchIndex;
use super::error::IndexError;
use super::model::{IndexRecord, RawHit};

/// In-memory stand-in for the vector index.
///
/// Records upserts per namespace, serves canned hits, and counts outbound
/// calls so tests can assert that no call was made on validation failures
/// or past the reason cap.
#[derive(Clone, Default)]
pub struct MockIndex {
    inner: Arc<RwLock<MockState>>,
}

#[derive(Default)]
struct MockState {
    records: HashMap<String, Vec<IndexRecord>>,
    hits: HashMap<String, Vec<RawHit>>,
    searched_namespaces: Vec<String>,
    upsert_calls: usize,
    search_calls: usize,
    fail_with: Option<(u16, String)>,
}

impl MockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `hits` for every subsequent search against `namespace`.
    pub fn push_hits(&self, namespace: &str, hits: Vec<RawHit>) {
        let mut state = self.inner.write().expect("mock lock");
        state.hits.insert(namespace.to_string(), hits);
    }

    /// Makes every subsequent operation fail with the given backend error.
    pub fn fail_with(&self, status: u16, body: &str) {
        let mut state = self.inner.write().expect("mock lock");
        state.fail_with = Some((status, body.to_string()));
    }

    pub fn upsert_calls(&self) -> usize {
        self.inner.read().expect("mock lock").upsert_calls
    }

    pub fn search_calls(&self) -> usize {
        self.inner.read().expect("mock lock").search_calls
    }

    /// Namespaces queried so far, in call order.
    pub fn searched_namespaces(&self) -> Vec<String> {
        self.inner
            .read()
            .expect("mock lock")
            .searched_namespaces
            .clone()
    }

    /// Records upserted into `namespace` so far.
    pub fn records_in(&self, namespace: &str) -> Vec<IndexRecord> {
        self.inner
            .read()
            .expect("mock lock")
            .records
            .get(namespace)
            .cloned()
            .unwrap_or_default()
    }

    fn failure(state: &MockState) -> Option<IndexError> {
        state
            .fail_with
            .as_ref()
            .map(|(status, body)| IndexError::Api {
                status: *status,
                body: body.clone(),
            })
    }
}

impl SearchIndex for MockIndex {
    async fn upsert(&self, namespace: &str, record: IndexRecord) -> Result<(), IndexError> {
        let mut state = self.inner.write().expect("mock lock");
        state.upsert_calls += 1;
        if let Some(err) = Self::failure(&state) {
            return Err(err);
        }
        state
            .records
            .entry(namespace.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn search(
        &self,
        namespace: &str,
        _query_text: &str,
        top_k: usize,
    ) -> Result<Vec<RawHit>, IndexError> {
        let mut state = self.inner.write().expect("mock lock");
        state.search_calls += 1;
        state.searched_namespaces.push(namespace.to_string());
        if let Some(err) = Self::failure(&state) {
            return Err(err);
        }
        Ok(state
            .hits
            .get(namespace)
            .map(|hits| hits.iter().take(top_k).cloned().collect())
            .unwrap_or_default())
    }

    async fn stats(&self) -> Result<Value, IndexError> {
        let state = self.inner.read().expect("mock lock");
        if let Some(err) = Self::failure(&state) {
            return Err(err);
        }
        let namespaces: serde_json::Map<String, Value> = state
            .records
            .iter()
            .map(|(namespace, records)| {
                (
                    namespace.clone(),
                    json!({ "recordCount": records.len() }),
                )
            })
            .collect();
        Ok(json!({ "namespaces": namespaces }))
    }
}
