use thiserror::Error;

/// Result type for audit store operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Audit-store errors.
///
/// Every kind stays distinguishable at the caller: a lookup miss is
/// `NotFound` (a normal outcome, not an exceptional one), an append collision
/// is `DuplicateKey`, and an unreachable persistence medium is `Unavailable`
/// so the caller can decide whether to retry. Nothing is swallowed or
/// converted to a safe default.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit entry not found: {0}")]
    NotFound(String),

    #[error("duplicate audit id: {0}")]
    DuplicateKey(String),

    #[error("audit storage unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}
