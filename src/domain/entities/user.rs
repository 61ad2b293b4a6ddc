//! Authenticated user identity and realm role model.

use std::fmt;
use std::str::FromStr;

/// Membership role within a realm, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealmRole {
    Member,
    Moderator,
    Administrator,
    Owner,
}

impl RealmRole {
    /// Returns true for roles allowed to change realm-level configuration.
    pub fn is_admin(self) -> bool {
        matches!(self, RealmRole::Administrator | RealmRole::Owner)
    }

    /// Stable lowercase identifier used in the database and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            RealmRole::Member => "member",
            RealmRole::Moderator => "moderator",
            RealmRole::Administrator => "administrator",
            RealmRole::Owner => "owner",
        }
    }
}

impl fmt::Display for RealmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RealmRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(RealmRole::Member),
            "moderator" => Ok(RealmRole::Moderator),
            "administrator" => Ok(RealmRole::Administrator),
            "owner" => Ok(RealmRole::Owner),
            other => Err(format!("unknown realm role '{other}'")),
        }
    }
}

/// The identity resolved from a bearer token.
///
/// Inserted into request extensions by the authentication middleware and
/// consumed by handlers; every API operation is scoped to `realm_id`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub realm_id: i64,
    pub email: String,
    pub role: RealmRole,
}
