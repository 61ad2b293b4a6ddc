//! Repository trait for playground storage.

use crate::domain::entities::{NewPlayground, Playground};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for realm playground records.
///
/// Every read and delete is scoped by realm id: a playground id from another
/// realm is indistinguishable from a nonexistent one, which is what keeps
/// tenants from reaching across the boundary.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPlaygroundRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_playground.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaygroundRepository: Send + Sync {
    /// Inserts a new playground and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with the uniqueness message if the
    /// `(realm, language, name)` triple already exists.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, new_playground: NewPlayground) -> Result<Playground, AppError>;

    /// Finds a playground by id within `realm_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, realm_id: i64, id: i64) -> Result<Option<Playground>, AppError>;

    /// Lists all playgrounds configured for `realm_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_realm(&self, realm_id: i64) -> Result<Vec<Playground>, AppError>;

    /// Deletes a playground by id within `realm_id`.
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if no matching row existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, realm_id: i64, id: i64) -> Result<bool, AppError>;

    /// Counts playground records across all realms.
    ///
    /// Used by the health endpoint as a cheap liveness probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_all(&self) -> Result<i64, AppError>;
}
