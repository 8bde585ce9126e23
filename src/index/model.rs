use serde::{Deserialize, Serialize};

use crate::profile::{Record, RecordType, truncate_chars};

/// Max characters per metadata field accepted by the backend.
pub const MAX_FIELD_CHARS: usize = 500;

/// The salary field has a tighter limit.
pub const MAX_SALARY_CHARS: usize = 100;

/// A single record as written to the index.
///
/// `text` is the raw profile text; the backend embeds it server-side. The
/// remaining fields are the filter/display metadata stored alongside the
/// vector, each clipped to the backend's payload limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub skills: String,
    pub location: String,
    pub salary: String,
    pub position: String,
}

impl IndexRecord {
    /// Builds the upsert payload for `record` under the caller's id.
    pub fn from_record(id: &str, record: &Record, record_type: RecordType) -> Self {
        Self {
            id: id.to_string(),
            text: record.profile_text(record_type),
            record_type,
            name: truncate_chars(record.display_name(), MAX_FIELD_CHARS),
            skills: truncate_chars(record.combined_skills(), MAX_FIELD_CHARS),
            location: truncate_chars(record.display_location(), MAX_FIELD_CHARS),
            salary: truncate_chars(&record.salary_text(), MAX_SALARY_CHARS),
            position: truncate_chars(record.display_position(), MAX_FIELD_CHARS),
        }
    }
}

/// Metadata fields projected back with a search hit.
///
/// Deliberately a fixed struct rather than a free-form map so the writer
/// ([`IndexRecord`]) and the reader cannot silently drift apart on field
/// names. All fields are optional; the backend omits what it never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// One raw hit as returned by the backend, order untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: f64,
    #[serde(default)]
    pub fields: RecordMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertBody {
    pub records: Vec<IndexRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    pub query: SearchQuery<'a>,
    pub fields: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchQuery<'a> {
    pub inputs: SearchInputs<'a>,
    pub top_k: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchInputs<'a> {
    pub text: &'a str,
}
