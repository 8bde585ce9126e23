use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::IndexError;
use super::model::{
    IndexRecord, RawHit, SearchBody, SearchInputs, SearchQuery, SearchResponse, UpsertBody,
};

/// API version header required by the records API.
const PINECONE_API_VERSION: &str = "2025-01";

/// Metadata fields projected back with every search hit.
const HIT_FIELDS: &[&str] = &["type", "name", "skills", "location", "salary", "position"];

#[derive(Debug, Clone)]
/// REST client for the Pinecone integrated-inference records API.
///
/// Text is submitted raw; embedding happens server-side. Every operation
/// is a single outbound call with no retry: a failed call surfaces
/// immediately as an [`IndexError`].
pub struct PineconeClient {
    http: Client,
    host: String,
    api_key: Option<String>,
}

impl PineconeClient {
    /// Creates a client for `host` (no scheme). The key may be absent at
    /// construction time; operations fail with
    /// [`IndexError::MissingApiKey`] when it is still unset at call time.
    pub fn new(host: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            host: host.into(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, IndexError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(IndexError::MissingApiKey)
    }

    async fn call<B>(&self, endpoint: &str, body: &B) -> Result<reqwest::Response, IndexError>
    where
        B: Serialize + ?Sized,
    {
        let key = self.api_key()?;
        let url = format!("https://{}{}", self.host, endpoint);

        let response = self
            .http
            .post(&url)
            .header("Api-Key", key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|source| IndexError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndexError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

/// Minimal async interface to the vector index used by higher-level code.
pub trait SearchIndex: Send + Sync {
    /// Writes one record into `namespace`.
    fn upsert(
        &self,
        namespace: &str,
        record: IndexRecord,
    ) -> impl std::future::Future<Output = Result<(), IndexError>> + Send;

    /// Nearest-neighbor search over `namespace` for `query_text`.
    ///
    /// Returns up to `top_k` hits in backend order, or an empty list when
    /// the backend reports no hits.
    fn search(
        &self,
        namespace: &str,
        query_text: &str,
        top_k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, IndexError>> + Send;

    /// Index-wide statistics, passed through verbatim.
    fn stats(&self) -> impl std::future::Future<Output = Result<Value, IndexError>> + Send;
}

impl SearchIndex for PineconeClient {
    async fn upsert(&self, namespace: &str, record: IndexRecord) -> Result<(), IndexError> {
        let endpoint = format!("/records/namespaces/{namespace}/upsert");
        let body = UpsertBody {
            records: vec![record],
        };
        self.call(&endpoint, &body).await?;
        debug!(namespace, "record upserted to index");
        Ok(())
    }

    async fn search(
        &self,
        namespace: &str,
        query_text: &str,
        top_k: usize,
    ) -> Result<Vec<RawHit>, IndexError> {
        let endpoint = format!("/records/namespaces/{namespace}/search");
        let body = SearchBody {
            query: SearchQuery {
                inputs: SearchInputs { text: query_text },
                top_k,
            },
            fields: HIT_FIELDS,
        };

        let response = self.call(&endpoint, &body).await?;
        let parsed: SearchResponse = response.json().await.map_err(IndexError::Decode)?;

        Ok(parsed.result.map(|result| result.hits).unwrap_or_default())
    }

    async fn stats(&self) -> Result<Value, IndexError> {
        let response = self.call("/describe_index_stats", &Value::Object(Default::default())).await?;
        response.json().await.map_err(IndexError::Decode)
    }
}
