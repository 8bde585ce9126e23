//! HTTP gateway layer (axum).
//!
//! Explicit route table dispatching to typed handlers, plus the
//! permissive mirror-origin CORS the embedded CRM widget depends on.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderName, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handler::{search_handler, stats_handler, upsert_handler};
pub use state::HandlerState;

use crate::explain::ChatBackend;
use crate::gateway::payload::{HealthResponse, NotFoundResponse};
use crate::index::SearchIndex;

/// Value reported in the health probe's `cors` field.
const CORS_MODE: &str = "dynamic-origin";

pub fn create_router_with_state<I, C>(state: HandlerState<I, C>) -> Router
where
    I: SearchIndex + Clone + Send + Sync + 'static,
    C: ChatBackend + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/upsert", post(upsert_handler))
        .route("/search", post(search_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Mirror-origin CORS with credentials, as the embedded widget callers
/// expect. `tower-http` only emits the headers when the request carries
/// an `Origin`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Liveness/version probe; answers without touching any backend.
#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cors: CORS_MODE,
    })
}

async fn not_found_handler(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Not found",
            path: uri.path().to_string(),
        }),
    )
        .into_response()
}
