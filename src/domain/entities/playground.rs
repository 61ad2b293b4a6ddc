//! Playground entity representing a realm-scoped code playground configuration.

use chrono::{DateTime, Utc};

/// A configured external code playground for one realm.
///
/// Maps a Pygments language tag to a URL template used by clients to render
/// "open in playground" links next to code blocks. A realm may configure
/// several playgrounds for the same language under different names, but the
/// `(realm, language, name)` triple is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playground {
    pub id: i64,
    pub realm_id: i64,
    pub name: String,
    pub pygments_language: String,
    pub url_prefix: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Playground {
    /// Creates a new Playground instance.
    pub fn new(
        id: i64,
        realm_id: i64,
        name: String,
        pygments_language: String,
        url_prefix: String,
        created_by: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            realm_id,
            name,
            pygments_language,
            url_prefix,
            created_by,
            created_at,
        }
    }
}

/// Input data for creating a new playground.
#[derive(Debug, Clone)]
pub struct NewPlayground {
    pub realm_id: i64,
    pub name: String,
    pub pygments_language: String,
    pub url_prefix: String,
    pub created_by: Option<i64>,
}
