//! PostgreSQL adapter for the audit store.
//!
//! INSERT-only table keyed by audit id. The primary-key constraint is what
//! serializes racing appends for the same id: exactly one insert wins and the
//! rest surface as `DuplicateKey`. Entries are visible to readers only once
//! the insert commits, so a reader never sees a partial entry.

use crate::traits::AuditStore;
use crate::{AuditError, AuditResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use trustgate_types::{AuditEntry, AuditId, Citation, ResponseEnvelope, ResponseId};

/// PostgreSQL-backed audit store adapter.
#[derive(Clone)]
pub struct PostgresAuditStore {
    pool: PgPool,
}

impl PostgresAuditStore {
    /// Connect to PostgreSQL and initialize the audit schema.
    pub async fn connect(database_url: &str) -> AuditResult<Self> {
        Self::connect_with_options(database_url, 10, 5).await
    }

    /// Connect with explicit pool parameters.
    pub async fn connect_with_options(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> AuditResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| AuditError::Unavailable(format!("failed to connect postgres: {e}")))?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create adapter from an existing pool.
    pub async fn from_pool(pool: PgPool) -> AuditResult<Self> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn init_schema(&self) -> AuditResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trustgate_audit_entries (
                audit_id UUID PRIMARY KEY,
                response_id UUID NOT NULL,
                query TEXT NOT NULL,
                answer TEXT NOT NULL,
                citations JSONB NOT NULL,
                confidence DOUBLE PRECISION NOT NULL,
                timestamp TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AuditError::Backend(format!("schema init failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl AuditStore for PostgresAuditStore {
    async fn append(&self, envelope: &ResponseEnvelope) -> AuditResult<AuditEntry> {
        let entry = AuditEntry::from_envelope(envelope, Utc::now());
        let citations = serde_json::to_value(&entry.citations)
            .map_err(|e| AuditError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO trustgate_audit_entries
                (audit_id, response_id, query, answer, citations, confidence, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.audit_id.as_uuid())
        .bind(entry.response_id.as_uuid())
        .bind(&entry.query)
        .bind(&entry.answer)
        .bind(citations)
        .bind(entry.confidence)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| map_append_error(e, &entry.audit_id))?;

        tracing::debug!(audit_id = %entry.audit_id, "audit entry appended");
        Ok(entry)
    }

    async fn get(&self, audit_id: &AuditId) -> AuditResult<AuditEntry> {
        let row = sqlx::query(
            r#"
            SELECT audit_id, response_id, query, answer, citations, confidence, timestamp
              FROM trustgate_audit_entries
             WHERE audit_id = $1
            "#,
        )
        .bind(audit_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let row = row.ok_or_else(|| AuditError::NotFound(audit_id.to_string()))?;
        row_to_entry(&row)
    }

    async fn len(&self) -> AuditResult<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM trustgate_audit_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| AuditError::Backend(e.to_string()))?;
        Ok(count as usize)
    }
}

fn row_to_entry(row: &sqlx::postgres::PgRow) -> AuditResult<AuditEntry> {
    let audit_id: uuid::Uuid = row
        .try_get("audit_id")
        .map_err(|e| AuditError::Backend(e.to_string()))?;
    let response_id: uuid::Uuid = row
        .try_get("response_id")
        .map_err(|e| AuditError::Backend(e.to_string()))?;
    let citations_value: serde_json::Value = row
        .try_get("citations")
        .map_err(|e| AuditError::Backend(e.to_string()))?;
    let citations: Vec<Citation> = serde_json::from_value(citations_value)
        .map_err(|e| AuditError::Serialization(e.to_string()))?;
    let timestamp: DateTime<Utc> = row
        .try_get("timestamp")
        .map_err(|e| AuditError::Backend(e.to_string()))?;

    Ok(AuditEntry {
        audit_id: AuditId::from(audit_id),
        response_id: ResponseId::from(response_id),
        query: row
            .try_get("query")
            .map_err(|e| AuditError::Backend(e.to_string()))?,
        answer: row
            .try_get("answer")
            .map_err(|e| AuditError::Backend(e.to_string()))?,
        citations,
        confidence: row
            .try_get("confidence")
            .map_err(|e| AuditError::Backend(e.to_string()))?,
        timestamp,
    })
}

fn map_append_error(err: sqlx::Error, audit_id: &AuditId) -> AuditError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AuditError::DuplicateKey(audit_id.to_string());
        }
    }
    map_sqlx_error(err)
}

fn map_sqlx_error(err: sqlx::Error) -> AuditError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => AuditError::Unavailable(err.to_string()),
        _ => AuditError::Backend(err.to_string()),
    }
}
