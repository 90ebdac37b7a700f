use crate::error::{PipelineError, PipelineResult};
use std::sync::Arc;
use trustgate_scoring::{assemble_citations, ConfidenceStrategy};
use trustgate_types::{AuditId, ResponseEnvelope, ResponseId, RetrievedDocument};

/// Builds fully populated response envelopes.
///
/// Construction is atomic: input is validated before any identifier is
/// allocated, and the returned envelope has every field populated - there is
/// no observable intermediate state.
pub struct EnvelopeBuilder {
    strategy: Arc<dyn ConfidenceStrategy>,
}

impl EnvelopeBuilder {
    pub fn new(strategy: Arc<dyn ConfidenceStrategy>) -> Self {
        Self { strategy }
    }

    pub fn build(
        &self,
        query: &str,
        answer: &str,
        documents: &[RetrievedDocument],
    ) -> PipelineResult<ResponseEnvelope> {
        validate_documents(documents)?;

        let scores: Vec<f64> = documents.iter().map(|doc| doc.relevance_score).collect();
        let confidence = self.strategy.estimate(&scores);
        let citations = assemble_citations(documents);

        Ok(ResponseEnvelope {
            response_id: ResponseId::generate(),
            query: query.to_string(),
            answer: answer.to_string(),
            citations,
            confidence,
            audit_id: AuditId::generate(),
        })
    }
}

fn validate_documents(documents: &[RetrievedDocument]) -> PipelineResult<()> {
    for (rank, doc) in documents.iter().enumerate() {
        if !doc.relevance_score.is_finite() || doc.relevance_score < 0.0 {
            return Err(PipelineError::Validation(format!(
                "document '{}' at rank {} has invalid relevance score {}",
                doc.source_id, rank, doc.relevance_score
            )));
        }
    }
    Ok(())
}
