//! Audit event model for realm mutations.
//!
//! Every playground mutation produces a [`RealmEvent`] describing what
//! changed and who changed it. Events are passed from the action service to
//! the background writer via a channel, decoupling the HTTP response from the
//! audit log write.

use serde_json::json;

use crate::domain::entities::Playground;

/// Kind of realm mutation being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealmEventType {
    PlaygroundAdded,
    PlaygroundRemoved,
}

impl RealmEventType {
    /// Stable identifier stored in the audit log.
    pub fn as_str(self) -> &'static str {
        match self {
            RealmEventType::PlaygroundAdded => "playground_added",
            RealmEventType::PlaygroundRemoved => "playground_removed",
        }
    }
}

/// An audit log entry in flight between the action service and the writer.
#[derive(Debug, Clone)]
pub struct RealmEvent {
    pub realm_id: i64,
    pub acting_user_id: i64,
    pub event_type: RealmEventType,
    /// Snapshot of the affected record, serialized into the log as jsonb.
    pub payload: serde_json::Value,
}

impl RealmEvent {
    /// Event recording the creation of `playground` by `acting_user_id`.
    pub fn playground_added(acting_user_id: i64, playground: &Playground) -> Self {
        Self {
            realm_id: playground.realm_id,
            acting_user_id,
            event_type: RealmEventType::PlaygroundAdded,
            payload: snapshot(playground),
        }
    }

    /// Event recording the removal of `playground` by `acting_user_id`.
    ///
    /// Carries the full snapshot of the deleted record so the log remains
    /// useful after the row is gone.
    pub fn playground_removed(acting_user_id: i64, playground: &Playground) -> Self {
        Self {
            realm_id: playground.realm_id,
            acting_user_id,
            event_type: RealmEventType::PlaygroundRemoved,
            payload: snapshot(playground),
        }
    }
}

fn snapshot(playground: &Playground) -> serde_json::Value {
    json!({
        "id": playground.id,
        "name": playground.name,
        "pygments_language": playground.pygments_language,
        "url_prefix": playground.url_prefix,
    })
}
