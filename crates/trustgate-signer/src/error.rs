use thiserror::Error;

/// Result type for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;

/// Signer-layer errors.
///
/// Verification failure is deliberately NOT an error kind: an invalid
/// signature is a normal boolean outcome of [`crate::verify_signature`].
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("key material error: {0}")]
    KeyMaterial(String),

    #[error("key file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("canonical serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
