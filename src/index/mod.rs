//! Vector index client.
//!
//! Thin REST layer over the managed vector backend: upsert-records and
//! query-by-text, each scoped to a namespace, plus the index statistics
//! endpoint. The backend owns all persistent state; this module holds
//! none.

pub mod client;
pub mod error;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{PineconeClient, SearchIndex};
pub use error::IndexError;
pub use model::{IndexRecord, MAX_FIELD_CHARS, MAX_SALARY_CHARS, RawHit, RecordMetadata};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockIndex;
