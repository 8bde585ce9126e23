use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::profile::{Record, RecordType};
use crate::ranking::{DEFAULT_TOP_K, Match};

/// Body of `POST /upsert`.
///
/// All three fields are required; they stay `Option` here so the handler
/// can report absence with the service's own 400 message instead of a
/// deserializer error.
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    pub record_id: Option<String>,
    pub record: Option<Record>,
    pub record_type: Option<RecordType>,
}

/// Body of `POST /search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub record_id: Option<String>,
    pub record: Option<Record>,
    pub record_type: Option<RecordType>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub generate_reasons: bool,
    #[serde(default)]
    pub generate_summary: bool,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub success: bool,
    pub record_id: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub record_id: String,
    pub matches: Vec<Match>,
    /// Overall evaluation; `null` unless summary mode ran and succeeded.
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub cors: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub pinecone_connected: bool,
    pub stats: Value,
}

#[derive(Debug, Serialize)]
pub struct StatsErrorResponse {
    pub success: bool,
    pub pinecone_connected: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub path: String,
}
