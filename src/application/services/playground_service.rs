//! Playground lifecycle service.

use regex::Regex;
use std::sync::Arc;
use std::sync::LazyLock;
use tokio::sync::mpsc;

use crate::domain::entities::{AuthenticatedUser, NewPlayground, Playground};
use crate::domain::realm_event::RealmEvent;
use crate::domain::repositories::PlaygroundRepository;
use crate::error::AppError;
use crate::utils::{url_template, url_validation};

/// Character class accepted for Pygments language tags.
static PYGMENTS_LANGUAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ a-zA-Z0-9_+\-./#]*$").unwrap());

/// Service for managing realm playground configurations.
///
/// Validates candidate records, persists them with the store's uniqueness
/// guarantee, and emits an audit event for every mutation. All operations are
/// scoped to the acting user's realm.
pub struct PlaygroundService<R: PlaygroundRepository> {
    repository: Arc<R>,
    event_tx: mpsc::Sender<RealmEvent>,
}

impl<R: PlaygroundRepository> PlaygroundService<R> {
    /// Creates a new playground service.
    pub fn new(repository: Arc<R>, event_tx: mpsc::Sender<RealmEvent>) -> Self {
        Self {
            repository,
            event_tx,
        }
    }

    /// Creates a playground in the actor's realm and returns its id.
    ///
    /// # Validation
    ///
    /// Checked in order, first failure wins:
    /// 1. `url_prefix` must be an absolute http(s) URL
    /// 2. its template syntax must be well formed
    /// 3. `code` must be the only template variable
    /// 4. `pygments_language` must match the allowed character class
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails or the
    /// `(realm, language, name)` triple already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn add_playground(
        &self,
        actor: &AuthenticatedUser,
        name: String,
        pygments_language: String,
        url_prefix: String,
    ) -> Result<i64, AppError> {
        check_url_prefix(&url_prefix)?;
        check_pygments_language(&pygments_language)?;

        let created = self
            .repository
            .create(NewPlayground {
                realm_id: actor.realm_id,
                name,
                pygments_language,
                url_prefix,
                created_by: Some(actor.user_id),
            })
            .await?;

        self.emit(RealmEvent::playground_added(actor.user_id, &created));

        Ok(created.id)
    }

    /// Removes a playground by id within the actor's realm.
    ///
    /// An id belonging to another realm is treated as nonexistent, so
    /// cross-tenant deletion is impossible even with id reuse.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] ("Invalid playground") if no such
    /// record exists in the actor's realm.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn remove_playground(
        &self,
        actor: &AuthenticatedUser,
        playground_id: i64,
    ) -> Result<(), AppError> {
        let playground = self
            .repository
            .find_by_id(actor.realm_id, playground_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid playground"))?;

        let deleted = self.repository.delete(actor.realm_id, playground_id).await?;
        if !deleted {
            // Lost a race with a concurrent delete.
            return Err(AppError::not_found("Invalid playground"));
        }

        self.emit(RealmEvent::playground_removed(actor.user_id, &playground));

        Ok(())
    }

    /// Lists the playgrounds configured for `realm_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_playgrounds(&self, realm_id: i64) -> Result<Vec<Playground>, AppError> {
        self.repository.list_for_realm(realm_id).await
    }

    /// Counts playground records across all realms.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_playgrounds(&self) -> Result<i64, AppError> {
        self.repository.count_all().await
    }

    /// Hands an audit event to the background writer without blocking.
    ///
    /// A full or closed channel drops the event; the mutation itself has
    /// already succeeded and must not be failed retroactively.
    fn emit(&self, event: RealmEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            metrics::counter!("realm_events_dropped_total").increment(1);
            tracing::warn!(error = %e, "audit event not enqueued");
        }
    }
}

/// Validates a playground URL prefix: absolute URL, well-formed template,
/// `code` as the only variable.
fn check_url_prefix(url_prefix: &str) -> Result<(), AppError> {
    if !url_validation::is_absolute_http_url(url_prefix) {
        return Err(AppError::validation("url_prefix is not a URL"));
    }

    let variables = url_template::template_variables(url_prefix)
        .map_err(|_| AppError::validation("Invalid URL template."))?;

    if variables.iter().any(|v| v != "code") {
        return Err(AppError::validation(
            "\"code\" should be the only variable present in the URL template",
        ));
    }

    Ok(())
}

/// Validates the Pygments language tag character class.
fn check_pygments_language(pygments_language: &str) -> Result<(), AppError> {
    if !PYGMENTS_LANGUAGE_REGEX.is_match(pygments_language) {
        return Err(AppError::validation(
            "Invalid characters in pygments language",
        ));
    }

    Ok(())
}
