//! DTOs for realm playground endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Playground;

/// Request to configure a new playground.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPlaygroundRequest {
    /// Display name, unique per (realm, language).
    #[validate(length(min = 1, max = 60, message = "Invalid name"))]
    pub name: String,

    /// Pygments language tag the playground applies to.
    #[validate(length(min = 1, max = 40, message = "Invalid pygments language"))]
    pub pygments_language: String,

    /// Absolute URL template; `{code}` is the only allowed placeholder.
    pub url_prefix: String,
}

/// Success envelope for playground creation.
#[derive(Debug, Serialize)]
pub struct AddPlaygroundResponse {
    pub result: &'static str,
    pub id: i64,
}

/// Success envelope for playground deletion.
#[derive(Debug, Serialize)]
pub struct RemovePlaygroundResponse {
    pub result: &'static str,
}

/// Success envelope listing a realm's playgrounds.
#[derive(Debug, Serialize)]
pub struct PlaygroundListResponse {
    pub result: &'static str,
    pub playgrounds: Vec<PlaygroundItem>,
}

/// Individual playground record as exposed to clients.
#[derive(Debug, Serialize)]
pub struct PlaygroundItem {
    pub id: i64,
    pub name: String,
    pub pygments_language: String,
    pub url_prefix: String,
}

impl From<Playground> for PlaygroundItem {
    fn from(p: Playground) -> Self {
        PlaygroundItem {
            id: p.id,
            name: p.name,
            pygments_language: p.pygments_language,
            url_prefix: p.url_prefix,
        }
    }
}
