use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::index::IndexError;

/// Message returned when any of the required request fields is absent.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: record_id, record, record_type";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// One of the required request fields was absent or empty.
    #[error("Missing required fields: record_id, record, record_type")]
    MissingFields,

    /// The request body could not be decoded into the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The vector backend call failed; the upstream message is surfaced.
    #[error(transparent)]
    Index(#[from] IndexError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::MissingFields | GatewayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            GatewayError::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
