use async_trait::async_trait;
use thiserror::Error;
use trustgate_types::{RetrievedDocument, ScoreScale};

/// Failure inside an upstream collaborator, opaque to the pipeline.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Upstream retrieval subsystem.
///
/// An opaque, possibly-empty producer of rank-ordered documents
/// (most-relevant first). Implementations must declare their score scale;
/// the pipeline only accepts the distance convention.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Scale convention of the `relevance_score` values this retriever
    /// reports. Checked once at service construction.
    fn score_scale(&self) -> ScoreScale;

    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, CollaboratorError>;
}

/// Upstream answer generator.
///
/// Given the sanitized query and the retrieved documents, produces a single
/// answer string. The pipeline does not inspect how.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        query: &str,
        documents: &[RetrievedDocument],
    ) -> Result<String, CollaboratorError>;
}
