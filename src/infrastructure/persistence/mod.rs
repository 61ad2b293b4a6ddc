//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-checked queries. Row structs with `FromRow` derives live here so
//! the domain entities stay free of persistence concerns.
//!
//! # Repositories
//!
//! - [`PgPlaygroundRepository`] - Playground storage and retrieval
//! - [`PgTokenRepository`] - API token storage and identity resolution
//! - [`PgAuditLogRepository`] - Realm audit log

pub mod pg_audit_log_repository;
pub mod pg_playground_repository;
pub mod pg_token_repository;

pub use pg_audit_log_repository::PgAuditLogRepository;
pub use pg_playground_repository::PgPlaygroundRepository;
pub use pg_token_repository::PgTokenRepository;
