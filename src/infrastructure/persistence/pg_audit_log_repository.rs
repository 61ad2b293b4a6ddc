//! PostgreSQL implementation of the realm audit log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::realm_event::RealmEvent;
use crate::domain::repositories::{AuditLogEntry, AuditLogRepository};
use crate::error::AppError;

/// Database row shape for the `realm_audit_log` table.
#[derive(FromRow)]
struct AuditLogRow {
    id: i64,
    realm_id: i64,
    acting_user_id: i64,
    event_type: String,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLogEntry {
    fn from(row: AuditLogRow) -> Self {
        AuditLogEntry {
            id: row.id,
            realm_id: row.realm_id,
            acting_user_id: row.acting_user_id,
            event_type: row.event_type,
            payload: row.payload,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for the realm audit log.
///
/// Append-only; entries are never updated or deleted by the service.
pub struct PgAuditLogRepository {
    pool: Arc<PgPool>,
}

impl PgAuditLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn record(&self, event: &RealmEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO realm_audit_log (realm_id, acting_user_id, event_type, payload)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.realm_id)
        .bind(event.acting_user_id)
        .bind(event.event_type.as_str())
        .bind(&event.payload)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_recent(
        &self,
        realm_id: i64,
        limit: i64,
    ) -> Result<Vec<AuditLogEntry>, AppError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, realm_id, acting_user_id, event_type, payload, created_at
            FROM realm_audit_log
            WHERE realm_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(realm_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AuditLogEntry::from).collect())
    }
}
