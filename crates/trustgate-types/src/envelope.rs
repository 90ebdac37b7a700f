use crate::ids::{AuditId, ResponseId};
use serde::{Deserialize, Serialize};

/// One piece of citation evidence, derived 1:1 from a retrieved document.
///
/// Repeated `source_id`s are kept as separate entries: each retrieved chunk
/// is independent evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source_id: String,
    /// Full-precision score as reported by the retriever. Rounding happens
    /// only in [`Citation::display_label`].
    pub relevance_score: f64,
}

impl Citation {
    pub fn new(source_id: impl Into<String>, relevance_score: f64) -> Self {
        Self {
            source_id: source_id.into(),
            relevance_score,
        }
    }

    /// Human-facing rendering, score rounded to two decimals.
    pub fn display_label(&self) -> String {
        format!("{} (score={:.2})", self.source_id, self.relevance_score)
    }
}

/// The signable unit: answer plus trust metadata.
///
/// Built once by the envelope builder with every field populated, then
/// treated as immutable. `query` is carried for the audit trail but excluded
/// from the signed payload - it is metadata, not a trust claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub response_id: ResponseId,
    /// Sanitized input query (post-redaction).
    pub query: String,
    /// Generated answer text.
    pub answer: String,
    /// Rank-ordered citations, one per retrieved document used.
    pub citations: Vec<Citation>,
    /// Trust score, always within `[0.1, 1.0]`.
    pub confidence: f64,
    pub audit_id: AuditId,
}

/// A [`ResponseEnvelope`] with its signature attached.
///
/// The envelope's field values are exactly what was signed; `key_id` names
/// the signing-key generation so verifiers can hold several keys at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedEnvelope {
    #[serde(flatten)]
    pub envelope: ResponseEnvelope,
    /// Hex-encoded Ed25519 signature over the canonical payload.
    pub signature: String,
    /// Hex-encoded public key of the signer.
    pub public_key: String,
    /// Fingerprint of the signing key generation.
    pub key_id: String,
}
