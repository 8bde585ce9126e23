//! Kakehashi library crate (used by the server binary and integration tests).
//!
//! Semantic matching between jobseeker and job profiles: profiles are
//! rendered to text, embedded server-side by a managed vector index, and
//! matched across two fixed namespaces that are always crossed at search
//! time. An optional chat-completion backend explains individual matches
//! or summarizes a whole ranking.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Record`], [`RecordType`] - Caller-supplied profile records
//! - [`SearchIndex`], [`PineconeClient`], [`IndexRecord`], [`RawHit`],
//!   [`RecordMetadata`] - Vector index access
//! - [`Match`], [`rank`], [`scale_score`] - Match ranking
//! - [`ChatBackend`], [`OpenAiChat`], [`attach_reasons`],
//!   [`overall_summary`] - Explanation generation
//! - `gateway` - Axum router, handlers, and error mapping
//!
//! Mock backends are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod explain;
pub mod gateway;
pub mod index;
pub mod profile;
pub mod ranking;

pub use config::{Config, ConfigError, DEFAULT_OPENAI_MODEL, DEFAULT_PINECONE_HOST};
pub use explain::{
    ChatBackend, DEFAULT_MAX_REASONS, GenerationError, OpenAiChat, attach_reasons,
    overall_summary,
};
pub use index::{IndexError, IndexRecord, PineconeClient, RawHit, RecordMetadata, SearchIndex};
pub use profile::{NAMESPACE_JOBS, NAMESPACE_JOBSEEKERS, Record, RecordType};
pub use ranking::{DEFAULT_TOP_K, Match, rank, scale_score};

#[cfg(any(test, feature = "mock"))]
pub use explain::MockChat;
#[cfg(any(test, feature = "mock"))]
pub use index::MockIndex;
