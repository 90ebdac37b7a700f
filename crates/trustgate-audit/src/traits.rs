use crate::AuditResult;
use async_trait::async_trait;
use trustgate_types::{AuditEntry, AuditId, ResponseEnvelope};

/// Durable, append-only keyed store of every envelope ever issued.
///
/// Concurrency contract: appends for different audit ids do not block one
/// another beyond what the medium requires and never interleave; concurrent
/// appends for the same id are serialized so exactly one succeeds and the
/// rest observe `DuplicateKey`. A reader never observes a partially written
/// entry - each entry is fully absent or fully present.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Assign the current wall-clock timestamp and persist the envelope
    /// keyed by its `audit_id`. Returns the persisted entry.
    ///
    /// Once this reports success the entry survives process restart (for the
    /// durable adapters). The store performs no implicit retry - retry
    /// policy belongs to the caller.
    async fn append(&self, envelope: &ResponseEnvelope) -> AuditResult<AuditEntry>;

    /// Pure lookup by audit id. An unknown id yields
    /// [`crate::AuditError::NotFound`], never a default value.
    async fn get(&self, audit_id: &AuditId) -> AuditResult<AuditEntry>;

    /// Number of entries ever appended.
    async fn len(&self) -> AuditResult<usize>;
}
