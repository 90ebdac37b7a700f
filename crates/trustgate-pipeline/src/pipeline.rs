use crate::builder::EnvelopeBuilder;
use crate::collaborators::{Generator, Retriever};
use crate::error::{PipelineError, PipelineResult};
use std::sync::Arc;
use trustgate_audit::{AuditResult, AuditStore};
use trustgate_scoring::ConfidenceStrategy;
use trustgate_signer::{verify_signature, SignableFields, SigningIdentity};
use trustgate_types::{
    AuditEntry, AuditId, ResponseEnvelope, RetrievedDocument, ScoreScale, SignedEnvelope,
};

/// The core trust envelope pipeline: build, sign, audit, verify.
///
/// Owns its collaborators as explicit injected dependencies - one instance
/// is constructed at startup and shared by reference across request
/// handlers. All operations besides the audit append are synchronous and
/// CPU-bound; the signing key supports concurrent use without locking.
pub struct TrustPipeline {
    identity: Arc<SigningIdentity>,
    store: Arc<dyn AuditStore>,
    builder: EnvelopeBuilder,
}

impl TrustPipeline {
    pub fn new(
        identity: Arc<SigningIdentity>,
        store: Arc<dyn AuditStore>,
        strategy: Arc<dyn ConfidenceStrategy>,
    ) -> Self {
        Self {
            identity,
            store,
            builder: EnvelopeBuilder::new(strategy),
        }
    }

    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// End-to-end build + sign + audit. The single entry point used per
    /// incoming request.
    ///
    /// The envelope is signed before it is persisted; a storage failure is
    /// propagated to the caller and never reported as a successful audit.
    pub async fn submit(
        &self,
        query: &str,
        answer: &str,
        documents: &[RetrievedDocument],
    ) -> PipelineResult<SignedEnvelope> {
        let envelope = self.builder.build(query, answer, documents)?;
        let signature = self.identity.sign(&SignableFields::from(&envelope))?;

        self.store.append(&envelope).await?;
        tracing::info!(
            response_id = %envelope.response_id,
            audit_id = %envelope.audit_id,
            confidence = envelope.confidence,
            citations = envelope.citations.len(),
            "issued signed envelope"
        );

        Ok(SignedEnvelope {
            envelope,
            signature,
            public_key: self.identity.public_key_hex(),
            key_id: self.identity.key_id().to_string(),
        })
    }

    /// Audit lookup. A miss is `NotFound` - a first-class outcome, not an
    /// exceptional one.
    pub async fn lookup_audit(&self, audit_id: &AuditId) -> AuditResult<AuditEntry> {
        self.store.get(audit_id).await
    }

    /// Recompute the canonical bytes and check the signature. Independent of
    /// the audit store; a failed check is a boolean outcome, never an error.
    pub fn check_signature(
        &self,
        envelope: &ResponseEnvelope,
        signature_hex: &str,
        public_key_hex: &str,
    ) -> bool {
        verify_signature(&SignableFields::from(envelope), signature_hex, public_key_hex)
    }
}

/// Drives the full question-answering flow: retrieve, generate, envelope.
///
/// Construction validates the retriever's score-scale contract: the
/// confidence heuristic assumes distances, so a similarity-scale retriever
/// is rejected up front instead of silently inverting confidence.
pub struct AnswerService {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
    pipeline: Arc<TrustPipeline>,
    top_k: usize,
}

impl AnswerService {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn Generator>,
        pipeline: Arc<TrustPipeline>,
        top_k: usize,
    ) -> PipelineResult<Self> {
        if retriever.score_scale() == ScoreScale::Similarity {
            return Err(PipelineError::Validation(
                "retriever reports similarity-scale scores; the confidence policy requires \
                 distance-scale scores (lower = more relevant)"
                    .to_string(),
            ));
        }
        Ok(Self {
            retriever,
            generator,
            pipeline,
            top_k,
        })
    }

    /// Answer one already-sanitized query and wrap it in a signed envelope.
    pub async fn answer(&self, query: &str) -> PipelineResult<SignedEnvelope> {
        let documents = self
            .retriever
            .retrieve(query, self.top_k)
            .await
            .map_err(|e| PipelineError::Retrieval(e.to_string()))?;
        tracing::debug!(documents = documents.len(), "retrieval complete");

        let answer = self
            .generator
            .generate(query, &documents)
            .await
            .map_err(|e| PipelineError::Generation(e.to_string()))?;

        self.pipeline.submit(query, &answer, &documents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::CollaboratorError;
    use async_trait::async_trait;
    use trustgate_audit::{AuditError, InMemoryAuditStore};
    use trustgate_scoring::InverseDistance;
    use trustgate_types::Citation;

    fn test_pipeline() -> TrustPipeline {
        TrustPipeline::new(
            Arc::new(SigningIdentity::from_secret_bytes(&[42u8; 32])),
            Arc::new(InMemoryAuditStore::new()),
            Arc::new(InverseDistance),
        )
    }

    fn sample_documents() -> Vec<RetrievedDocument> {
        vec![
            RetrievedDocument::new("clause a", "A.pdf", 0.10),
            RetrievedDocument::new("clause b", "B.pdf", 0.30),
        ]
    }

    #[tokio::test]
    async fn submit_returns_verifiable_envelope() {
        let pipeline = test_pipeline();
        let signed = pipeline
            .submit("the query", "X", &sample_documents())
            .await
            .unwrap();

        assert_eq!(
            signed.envelope.citations,
            vec![Citation::new("A.pdf", 0.10), Citation::new("B.pdf", 0.30)]
        );
        assert!((signed.envelope.confidence - 0.8).abs() < 1e-12);
        assert!(pipeline.check_signature(
            &signed.envelope,
            &signed.signature,
            &signed.public_key
        ));
        assert_eq!(signed.key_id, pipeline.identity().key_id());
    }

    #[tokio::test]
    async fn submit_persists_audit_entry() {
        let pipeline = test_pipeline();
        let signed = pipeline
            .submit("the query", "X", &sample_documents())
            .await
            .unwrap();

        let entry = pipeline
            .lookup_audit(&signed.envelope.audit_id)
            .await
            .unwrap();
        assert_eq!(entry.response_id, signed.envelope.response_id);
        assert_eq!(entry.query, "the query");
        assert_eq!(entry.answer, "X");
        assert_eq!(entry.citations, signed.envelope.citations);
        assert_eq!(entry.confidence, signed.envelope.confidence);
    }

    #[tokio::test]
    async fn identical_submissions_get_distinct_ids() {
        let pipeline = test_pipeline();
        let docs = sample_documents();
        let first = pipeline.submit("q", "a", &docs).await.unwrap();
        let second = pipeline.submit("q", "a", &docs).await.unwrap();
        assert_ne!(first.envelope.response_id, second.envelope.response_id);
        assert_ne!(first.envelope.audit_id, second.envelope.audit_id);
        // Same signing input fields differ only by ids, so signatures differ.
        assert_ne!(first.signature, second.signature);
    }

    #[tokio::test]
    async fn unknown_audit_id_is_not_found() {
        let pipeline = test_pipeline();
        let result = pipeline.lookup_audit(&AuditId::generate()).await;
        assert!(matches!(result, Err(AuditError::NotFound(_))));
    }

    #[tokio::test]
    async fn tampered_citation_order_fails_check() {
        let pipeline = test_pipeline();
        let signed = pipeline
            .submit("q", "a", &sample_documents())
            .await
            .unwrap();

        let mut tampered = signed.envelope.clone();
        tampered.citations.swap(0, 1);
        assert!(!pipeline.check_signature(&tampered, &signed.signature, &signed.public_key));
    }

    #[tokio::test]
    async fn validation_failure_leaves_store_untouched() {
        let store = Arc::new(InMemoryAuditStore::new());
        let pipeline = TrustPipeline::new(
            Arc::new(SigningIdentity::from_secret_bytes(&[1u8; 32])),
            store.clone(),
            Arc::new(InverseDistance),
        );
        let docs = vec![RetrievedDocument::new("x", "bad.pdf", -1.0)];
        let result = pipeline.submit("q", "a", &docs).await;
        assert!(matches!(result, Err(PipelineError::Validation(_))));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    struct FixedRetriever {
        scale: ScoreScale,
        documents: Vec<RetrievedDocument>,
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        fn score_scale(&self) -> ScoreScale {
            self.scale
        }

        async fn retrieve(
            &self,
            _query: &str,
            top_k: usize,
        ) -> Result<Vec<RetrievedDocument>, CollaboratorError> {
            Ok(self.documents.iter().take(top_k).cloned().collect())
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        async fn generate(
            &self,
            query: &str,
            documents: &[RetrievedDocument],
        ) -> Result<String, CollaboratorError> {
            Ok(format!("{} ({} sources)", query, documents.len()))
        }
    }

    #[tokio::test]
    async fn similarity_scale_retriever_is_rejected() {
        let result = AnswerService::new(
            Arc::new(FixedRetriever {
                scale: ScoreScale::Similarity,
                documents: vec![],
            }),
            Arc::new(EchoGenerator),
            Arc::new(test_pipeline()),
            3,
        );
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }

    #[tokio::test]
    async fn answer_flow_respects_top_k_and_signs() {
        let documents: Vec<RetrievedDocument> = (0..5)
            .map(|i| RetrievedDocument::new(format!("chunk {i}"), format!("doc{i}.pdf"), 0.1))
            .collect();
        let service = AnswerService::new(
            Arc::new(FixedRetriever {
                scale: ScoreScale::Distance,
                documents,
            }),
            Arc::new(EchoGenerator),
            Arc::new(test_pipeline()),
            3,
        )
        .unwrap();

        let signed = service.answer("what happened?").await.unwrap();
        assert_eq!(signed.envelope.citations.len(), 3);
        assert_eq!(signed.envelope.answer, "what happened? (3 sources)");
    }

    #[tokio::test]
    async fn empty_retrieval_still_produces_envelope() {
        let service = AnswerService::new(
            Arc::new(FixedRetriever {
                scale: ScoreScale::Distance,
                documents: vec![],
            }),
            Arc::new(EchoGenerator),
            Arc::new(test_pipeline()),
            3,
        )
        .unwrap();

        let signed = service.answer("anything?").await.unwrap();
        assert!(signed.envelope.citations.is_empty());
        assert_eq!(signed.envelope.confidence, 0.2);
    }
}
