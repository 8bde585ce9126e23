use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by vector index operations.
pub enum IndexError {
    /// The backend API key was not configured.
    #[error("PINECONE_API_KEY must be set")]
    MissingApiKey,

    /// The HTTP request could not be sent.
    #[error("index request to '{endpoint}' failed: {source}")]
    Request {
        /// Endpoint path.
        endpoint: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("Pinecone API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The backend response body could not be decoded.
    #[error("failed to decode index response: {0}")]
    Decode(#[source] reqwest::Error),
}
