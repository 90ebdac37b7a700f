//! In-memory reference implementation of the audit store.
//!
//! Deterministic and test-friendly. Entries do not survive process restart;
//! deployments that need the durability contract use the Postgres adapter.

use crate::traits::AuditStore;
use crate::{AuditError, AuditResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use trustgate_types::{AuditEntry, AuditId, ResponseEnvelope};

/// In-memory audit store adapter.
#[derive(Default)]
pub struct InMemoryAuditStore {
    entries: RwLock<HashMap<AuditId, AuditEntry>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, envelope: &ResponseEnvelope) -> AuditResult<AuditEntry> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| AuditError::Backend("audit lock poisoned".to_string()))?;

        if guard.contains_key(&envelope.audit_id) {
            return Err(AuditError::DuplicateKey(envelope.audit_id.to_string()));
        }

        let entry = AuditEntry::from_envelope(envelope, Utc::now());
        guard.insert(entry.audit_id, entry.clone());
        Ok(entry)
    }

    async fn get(&self, audit_id: &AuditId) -> AuditResult<AuditEntry> {
        let guard = self
            .entries
            .read()
            .map_err(|_| AuditError::Backend("audit lock poisoned".to_string()))?;
        guard
            .get(audit_id)
            .cloned()
            .ok_or_else(|| AuditError::NotFound(audit_id.to_string()))
    }

    async fn len(&self) -> AuditResult<usize> {
        let guard = self
            .entries
            .read()
            .map_err(|_| AuditError::Backend("audit lock poisoned".to_string()))?;
        Ok(guard.len())
    }
}
