use crate::error::SignerResult;
use crate::hex::hex_decode;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde_json::json;
use trustgate_types::{AuditId, Citation, ResponseEnvelope, ResponseId};

/// The exact field set covered by a signature.
///
/// `query` is excluded on purpose: it is request metadata, not a trust claim.
/// No field may be added, removed or reordered between signing and
/// verification without breaking the signature.
#[derive(Debug, Clone)]
pub struct SignableFields<'a> {
    pub response_id: &'a ResponseId,
    pub answer: &'a str,
    pub citations: &'a [Citation],
    pub confidence: f64,
    pub audit_id: &'a AuditId,
}

impl<'a> SignableFields<'a> {
    /// Serialize into the canonical byte string both endpoints sign/verify.
    ///
    /// serde_json's default map is ordered, so keys come out
    /// lexicographically sorted at every nesting level; `to_vec` emits fixed
    /// separators with no whitespace. Repeated serialization of identical
    /// fields is byte-identical.
    pub fn canonical_bytes(&self) -> SignerResult<Vec<u8>> {
        let payload = json!({
            "response_id": self.response_id,
            "answer": self.answer,
            "citations": self.citations,
            "confidence": self.confidence,
            "audit_id": self.audit_id,
        });
        Ok(serde_json::to_vec(&payload)?)
    }
}

impl<'a> From<&'a ResponseEnvelope> for SignableFields<'a> {
    fn from(envelope: &'a ResponseEnvelope) -> Self {
        Self {
            response_id: &envelope.response_id,
            answer: &envelope.answer,
            citations: &envelope.citations,
            confidence: envelope.confidence,
            audit_id: &envelope.audit_id,
        }
    }
}

/// Verify a hex-encoded Ed25519 signature against the canonical bytes of the
/// supplied fields.
///
/// Returns `false` - never an error - for malformed hex, wrong-length key or
/// signature material, or cryptographic mismatch. Pure and idempotent:
/// repeated calls with the same inputs always agree.
pub fn verify_signature(
    fields: &SignableFields<'_>,
    signature_hex: &str,
    public_key_hex: &str,
) -> bool {
    let message = match fields.canonical_bytes() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let sig_bytes = match hex_decode(signature_hex) {
        Ok(bytes) => bytes,
        Err(()) => return false,
    };
    let pk_bytes = match hex_decode(public_key_hex) {
        Ok(bytes) => bytes,
        Err(()) => return false,
    };

    let sig_array: [u8; 64] = match sig_bytes.as_slice().try_into() {
        Ok(array) => array,
        Err(_) => return false,
    };
    let pk_array: [u8; 32] = match pk_bytes.as_slice().try_into() {
        Ok(array) => array,
        Err(_) => return false,
    };

    let signature = Signature::from_bytes(&sig_array);
    let verifying_key = match VerifyingKey::from_bytes(&pk_array) {
        Ok(key) => key,
        Err(_) => return false,
    };

    verifying_key.verify(&message, &signature).is_ok()
}
