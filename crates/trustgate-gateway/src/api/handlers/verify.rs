//! Signature verification handler.

use crate::api::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use trustgate_signer::{verify_signature, SignableFields};
use trustgate_types::{AuditId, Citation, ResponseId};

/// Envelope fields plus signature material, exactly as issued.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub response_id: ResponseId,
    pub answer: String,
    pub citations: Vec<Citation>,
    pub confidence: f64,
    pub audit_id: AuditId,
    pub signature: String,
    pub public_key: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub signature_valid: bool,
}

/// Check a signature against the supplied envelope fields.
///
/// Always responds 200: an invalid signature is an informative outcome, not
/// an error. The check is independent of the audit store.
pub async fn verify(
    State(_state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let fields = SignableFields {
        response_id: &payload.response_id,
        answer: &payload.answer,
        citations: &payload.citations,
        confidence: payload.confidence,
        audit_id: &payload.audit_id,
    };
    let signature_valid = verify_signature(&fields, &payload.signature, &payload.public_key);
    Json(VerifyResponse { signature_valid })
}
