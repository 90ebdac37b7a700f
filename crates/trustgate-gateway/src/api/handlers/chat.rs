//! Chat handler: the end-to-end question-answering entry point.

use crate::api::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use serde::Deserialize;
use trustgate_types::SignedEnvelope;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    /// Optional caller identity, carried for request logs only.
    pub user_id: Option<String>,
}

/// Answer one question and return the signed trust envelope.
///
/// The raw query is redacted before it reaches retrieval, generation or the
/// audit trail.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> ApiResult<Json<SignedEnvelope>> {
    let query = state.redactor.redact(&payload.query);
    tracing::debug!(user_id = payload.user_id.as_deref(), "chat request");

    let signed = state.answers.answer(&query).await?;
    Ok(Json(signed))
}
