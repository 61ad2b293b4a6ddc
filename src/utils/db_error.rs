//! Database error classification helpers.

/// Name of the unique constraint on `(realm_id, pygments_language, name)`.
const PLAYGROUND_UNIQUE_CONSTRAINT: &str = "playgrounds_realm_language_name_key";

/// Returns true if `e` is a unique violation on the playground identity triple.
pub fn is_unique_violation_on_playground(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(PLAYGROUND_UNIQUE_CONSTRAINT))
}
