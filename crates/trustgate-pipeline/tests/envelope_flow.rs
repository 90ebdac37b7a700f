use std::sync::Arc;
use trustgate_audit::{AuditError, AuditStore, InMemoryAuditStore};
use trustgate_pipeline::TrustPipeline;
use trustgate_scoring::InverseDistance;
use trustgate_signer::SigningIdentity;
use trustgate_types::{AuditId, RetrievedDocument};

fn pipeline_with_store() -> (TrustPipeline, Arc<InMemoryAuditStore>) {
    let store = Arc::new(InMemoryAuditStore::new());
    let pipeline = TrustPipeline::new(
        Arc::new(SigningIdentity::from_secret_bytes(&[7u8; 32])),
        store.clone(),
        Arc::new(InverseDistance),
    );
    (pipeline, store)
}

#[tokio::test]
async fn full_flow_issue_verify_audit() {
    let (pipeline, _store) = pipeline_with_store();
    let documents = vec![
        RetrievedDocument::new("the notice period is thirty days", "A.pdf", 0.10),
        RetrievedDocument::new("termination requires written notice", "B.pdf", 0.30),
    ];

    let signed = pipeline
        .submit("what is the notice period?", "Thirty days.", &documents)
        .await
        .expect("submit should succeed");

    // The envelope verifies as issued.
    assert!(pipeline.check_signature(&signed.envelope, &signed.signature, &signed.public_key));

    // Scenario from the confidence policy: mean(0.10, 0.30) -> 0.8.
    assert!((signed.envelope.confidence - 0.8).abs() < 1e-12);
    assert_eq!(signed.envelope.citations.len(), 2);
    assert_eq!(signed.envelope.citations[0].source_id, "A.pdf");
    assert_eq!(signed.envelope.citations[1].source_id, "B.pdf");

    // The audit record matches the issued envelope, timestamp and all.
    let entry = pipeline
        .lookup_audit(&signed.envelope.audit_id)
        .await
        .expect("audit entry should exist");
    assert_eq!(entry.response_id, signed.envelope.response_id);
    assert_eq!(entry.answer, "Thirty days.");
}

#[tokio::test]
async fn verification_is_idempotent_and_side_effect_free() {
    let (pipeline, store) = pipeline_with_store();
    let signed = pipeline
        .submit("q", "a", &[])
        .await
        .expect("submit should succeed");

    let before = store.len().await.unwrap();
    for _ in 0..3 {
        assert!(pipeline.check_signature(
            &signed.envelope,
            &signed.signature,
            &signed.public_key
        ));
    }
    assert_eq!(store.len().await.unwrap(), before);
}

#[tokio::test]
async fn tampering_with_any_signed_field_breaks_the_envelope() {
    let (pipeline, _store) = pipeline_with_store();
    let documents = vec![
        RetrievedDocument::new("x", "A.pdf", 0.10),
        RetrievedDocument::new("y", "B.pdf", 0.30),
    ];
    let signed = pipeline
        .submit("q", "original answer", &documents)
        .await
        .expect("submit should succeed");

    let mut tampered = signed.envelope.clone();
    tampered.answer = "forged answer".to_string();
    assert!(!pipeline.check_signature(&tampered, &signed.signature, &signed.public_key));

    let mut tampered = signed.envelope.clone();
    tampered.citations.swap(0, 1);
    assert!(!pipeline.check_signature(&tampered, &signed.signature, &signed.public_key));

    let mut tampered = signed.envelope.clone();
    tampered.confidence = 1.0;
    assert!(!pipeline.check_signature(&tampered, &signed.signature, &signed.public_key));

    let mut tampered = signed.envelope.clone();
    tampered.audit_id = AuditId::generate();
    assert!(!pipeline.check_signature(&tampered, &signed.signature, &signed.public_key));
}

#[tokio::test]
async fn signatures_survive_identity_reload() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("signing.key");

    let signed = {
        let pipeline = TrustPipeline::new(
            Arc::new(SigningIdentity::load_or_generate(&key_path).unwrap()),
            Arc::new(InMemoryAuditStore::new()),
            Arc::new(InverseDistance),
        );
        pipeline.submit("q", "a", &[]).await.unwrap()
    };

    // A "restarted" pipeline loading the same key still verifies envelopes
    // issued before the restart.
    let reloaded = TrustPipeline::new(
        Arc::new(SigningIdentity::load_or_generate(&key_path).unwrap()),
        Arc::new(InMemoryAuditStore::new()),
        Arc::new(InverseDistance),
    );
    assert_eq!(reloaded.identity().key_id(), signed.key_id);
    assert!(reloaded.check_signature(&signed.envelope, &signed.signature, &signed.public_key));
}

#[tokio::test]
async fn audit_miss_is_a_first_class_outcome() {
    let (pipeline, _store) = pipeline_with_store();
    match pipeline.lookup_audit(&AuditId::generate()).await {
        Err(AuditError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}
