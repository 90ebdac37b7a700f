//! REST API surface.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_support {
    use super::state::AppState;
    use crate::generate::ExtractiveGenerator;
    use crate::retrieval::{Passage, StaticRetriever};
    use std::sync::Arc;
    use trustgate_audit::InMemoryAuditStore;
    use trustgate_pipeline::{AnswerService, TrustPipeline};
    use trustgate_redact::Redactor;
    use trustgate_scoring::InverseDistance;
    use trustgate_signer::SigningIdentity;

    /// Full in-memory state: deterministic retriever, extractive generator,
    /// memory audit store, fixed signing key.
    pub(crate) fn test_state() -> AppState {
        let retriever = StaticRetriever::new(vec![
            Passage {
                content: "the notice period for termination is thirty days".to_string(),
                source_id: "msa.pdf".to_string(),
            },
            Passage {
                content: "payment is due within sixty days of invoice".to_string(),
                source_id: "payment.pdf".to_string(),
            },
        ]);
        let pipeline = Arc::new(TrustPipeline::new(
            Arc::new(SigningIdentity::from_secret_bytes(&[42u8; 32])),
            Arc::new(InMemoryAuditStore::new()),
            Arc::new(InverseDistance),
        ));
        let answers = AnswerService::new(
            Arc::new(retriever),
            Arc::new(ExtractiveGenerator),
            pipeline.clone(),
            3,
        )
        .expect("distance-scale retriever");
        AppState::new(pipeline, Arc::new(answers), Arc::new(Redactor::new()))
    }
}
