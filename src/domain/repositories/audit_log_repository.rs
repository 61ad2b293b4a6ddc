//! Repository trait for the realm audit log.

use crate::domain::realm_event::RealmEvent;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A persisted audit log entry.
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    pub id: i64,
    pub realm_id: i64,
    pub acting_user_id: i64,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Repository interface for realm audit log entries.
///
/// Written by the background event worker; read by operators and tests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuditLogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persists one audit event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, event: &RealmEvent) -> Result<(), AppError>;

    /// Returns the newest entries for `realm_id`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_recent(&self, realm_id: i64, limit: i64)
    -> Result<Vec<AuditLogEntry>, AppError>;
}
