//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`PlaygroundRepository`] - Playground CRUD operations
//! - [`TokenRepository`] - API token authentication
//! - [`AuditLogRepository`] - Realm audit log writes and reads
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod audit_log_repository;
pub mod playground_repository;
pub mod token_repository;

pub use audit_log_repository::{AuditLogEntry, AuditLogRepository};
pub use playground_repository::PlaygroundRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use audit_log_repository::MockAuditLogRepository;
#[cfg(test)]
pub use playground_repository::MockPlaygroundRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
