use thiserror::Error;

#[derive(Debug, Error)]
/// Errors from the text-generation backend.
///
/// These never surface to HTTP callers: explanation is an enhancement,
/// not part of the matching contract, so the gateway collapses every
/// variant to a `null` reason/summary after logging it.
pub enum GenerationError {
    /// The generation API key was not configured.
    #[error("OPENAI_API_KEY not set")]
    MissingApiKey,

    /// The HTTP request could not be sent or decoded.
    #[error("chat completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("chat completion API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The backend returned no usable message content.
    #[error("chat completion returned empty content")]
    EmptyContent,
}
