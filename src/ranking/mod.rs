//! Crossed-namespace match ranking.
//!
//! A record is always matched against the opposite namespace from the one
//! it lives in: candidates against jobs, jobs against candidates.

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::debug;

use crate::index::{IndexError, RecordMetadata, SearchIndex};
use crate::profile::{Record, RecordType};

/// Hits requested per search when the caller does not say otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked match from the opposite namespace.
///
/// `id` is whatever identifier the opposite-side record was upserted
/// under; it is treated as an opaque string and never validated or
/// coerced — keeping upsert and lookup ids consistent is the caller's
/// responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub id: String,
    /// Similarity as a percentage with one decimal, `0.0..=100.0`.
    pub score: f64,
    pub metadata: RecordMetadata,
    /// Generated explanation; `None` unless reason generation ran and
    /// succeeded for this match.
    pub reason: Option<String>,
}

/// Scales a raw similarity in `[0, 1]` to a percentage with one decimal.
pub fn scale_score(raw: f64) -> f64 {
    (raw * 1000.0).round() / 10.0
}

/// Ranks the opposite-namespace records nearest to `record`.
///
/// Hit order is preserved exactly as returned by the backend, which is
/// trusted to return descending similarity and to exclude the source
/// record (it lives in the other namespace by construction). No
/// de-duplication or re-sorting happens here.
pub async fn rank<I: SearchIndex>(
    index: &I,
    record: &Record,
    record_type: RecordType,
    top_k: usize,
) -> Result<Vec<Match>, IndexError> {
    let namespace = record_type.search_namespace();
    let query_text = record.profile_text(record_type);

    let hits = index.search(namespace, &query_text, top_k).await?;
    debug!(namespace, hits = hits.len(), "ranked matches");

    Ok(hits
        .into_iter()
        .map(|hit| Match {
            id: hit.id,
            score: scale_score(hit.score),
            metadata: hit.fields,
            reason: None,
        })
        .collect())
}
