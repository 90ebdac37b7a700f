use crate::envelope::{Citation, ResponseEnvelope};
use crate::ids::{AuditId, ResponseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted projection of a [`ResponseEnvelope`], keyed by `audit_id`.
///
/// Write-once, read-many: the audit store never updates or deletes an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub audit_id: AuditId,
    pub response_id: ResponseId,
    pub query: String,
    pub answer: String,
    pub citations: Vec<Citation>,
    pub confidence: f64,
    /// Wall-clock instant assigned by the store at append time.
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Project an envelope into its audit record with the given timestamp.
    pub fn from_envelope(envelope: &ResponseEnvelope, timestamp: DateTime<Utc>) -> Self {
        Self {
            audit_id: envelope.audit_id,
            response_id: envelope.response_id,
            query: envelope.query.clone(),
            answer: envelope.answer.clone(),
            citations: envelope.citations.clone(),
            confidence: envelope.confidence,
            timestamp,
        }
    }
}
