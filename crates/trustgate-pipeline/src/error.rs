use thiserror::Error;
use trustgate_audit::AuditError;
use trustgate_signer::SignerError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline-level errors.
///
/// Validation failures happen before any identifier is allocated or any
/// store touched. Audit errors pass through unchanged so the caller can
/// still tell a duplicate key from an unavailable medium.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failure: {0}")]
    Validation(String),

    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("generation failed: {0}")]
    Generation(String),
}
