//! Shared application state injected into all handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, PlaygroundService};
use crate::domain::realm_event::RealmEvent;
use crate::infrastructure::persistence::{PgPlaygroundRepository, PgTokenRepository};

/// Application-wide shared state.
///
/// Cheap to clone: services are behind `Arc` and the event sender is a
/// channel handle. The sender is kept here (in addition to inside the
/// playground service) so the health endpoint can report queue status.
#[derive(Clone)]
pub struct AppState {
    pub playground_service: Arc<PlaygroundService<PgPlaygroundRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub event_tx: mpsc::Sender<RealmEvent>,
}
