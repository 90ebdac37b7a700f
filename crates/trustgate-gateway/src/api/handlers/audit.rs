//! Audit lookup handler.

use crate::api::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use trustgate_types::{AuditEntry, AuditId};

/// Fetch the permanent audit record for one issued envelope.
pub async fn get_audit(
    State(state): State<AppState>,
    Path(audit_id): Path<String>,
) -> ApiResult<Json<AuditEntry>> {
    let audit_id: AuditId = audit_id
        .parse()
        .map_err(|e: trustgate_types::IdParseError| ApiError::BadRequest(e.to_string()))?;

    let entry = state.pipeline.lookup_audit(&audit_id).await?;
    Ok(Json(entry))
}
