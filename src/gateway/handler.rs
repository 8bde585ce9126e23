use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::explain::{ChatBackend, DEFAULT_MAX_REASONS, attach_reasons, overall_summary};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    SearchRequest, SearchResponse, StatsErrorResponse, StatsResponse, UpsertRequest,
    UpsertResponse,
};
use crate::gateway::state::HandlerState;
use crate::index::{IndexRecord, SearchIndex};
use crate::profile::{Record, RecordType};
use crate::ranking::rank;

#[instrument(skip(state, body))]
pub async fn upsert_handler<I, C>(
    State(state): State<HandlerState<I, C>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<UpsertResponse>, GatewayError>
where
    I: SearchIndex + Clone + Send + Sync + 'static,
    C: ChatBackend + Clone + Send + Sync + 'static,
{
    let request: UpsertRequest =
        serde_json::from_value(body).map_err(|e| GatewayError::InvalidBody(e.to_string()))?;
    let (record_id, record, record_type) =
        require_fields(request.record_id, request.record, request.record_type)?;

    let index_record = IndexRecord::from_record(&record_id, &record, record_type);
    state
        .index
        .upsert(record_type.upsert_namespace(), index_record)
        .await
        .map_err(|err| {
            error!(record_id = %record_id, error = %err, "upsert failed");
            err
        })?;

    info!(
        record_id = %record_id,
        record_type = record_type.as_str(),
        namespace = record_type.upsert_namespace(),
        "record upserted"
    );

    Ok(Json(UpsertResponse {
        success: true,
        record_id,
    }))
}

#[instrument(skip(state, body))]
pub async fn search_handler<I, C>(
    State(state): State<HandlerState<I, C>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SearchResponse>, GatewayError>
where
    I: SearchIndex + Clone + Send + Sync + 'static,
    C: ChatBackend + Clone + Send + Sync + 'static,
{
    let request: SearchRequest =
        serde_json::from_value(body).map_err(|e| GatewayError::InvalidBody(e.to_string()))?;
    let top_k = request.top_k;
    let generate_reasons = request.generate_reasons;
    let generate_summary = request.generate_summary;
    let (record_id, record, record_type) =
        require_fields(request.record_id, request.record, request.record_type)?;

    let mut matches = rank(&state.index, &record, record_type, top_k)
        .await
        .map_err(|err| {
            error!(record_id = %record_id, error = %err, "search failed");
            err
        })?;

    // At most one enrichment pass per request; a requested summary takes
    // priority over per-match reasons.
    let mut summary = None;
    if generate_summary && !matches.is_empty() {
        summary = overall_summary(&state.chat, &record, record_type, &matches).await;
    } else if generate_reasons && !matches.is_empty() {
        attach_reasons(
            &state.chat,
            &record,
            record_type,
            &mut matches,
            DEFAULT_MAX_REASONS,
        )
        .await;
    }

    info!(
        record_id = %record_id,
        record_type = record_type.as_str(),
        matches = matches.len(),
        "search completed"
    );

    Ok(Json(SearchResponse {
        success: true,
        record_id,
        matches,
        summary,
    }))
}

#[instrument(skip(state))]
pub async fn stats_handler<I, C>(State(state): State<HandlerState<I, C>>) -> Response
where
    I: SearchIndex + Clone + Send + Sync + 'static,
    C: ChatBackend + Clone + Send + Sync + 'static,
{
    match state.index.stats().await {
        Ok(stats) => Json(StatsResponse {
            success: true,
            pinecone_connected: true,
            stats,
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "stats fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatsErrorResponse {
                    success: false,
                    pinecone_connected: false,
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Checks the three required fields in one place. An empty `record_id`
/// counts as missing.
fn require_fields(
    record_id: Option<String>,
    record: Option<Record>,
    record_type: Option<RecordType>,
) -> Result<(String, Record, RecordType), GatewayError> {
    match (record_id, record, record_type) {
        (Some(id), Some(record), Some(record_type)) if !id.is_empty() => {
            Ok((id, record, record_type))
        }
        _ => Err(GatewayError::MissingFields),
    }
}
