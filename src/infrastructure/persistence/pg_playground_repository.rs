//! PostgreSQL implementation of playground repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewPlayground, Playground};
use crate::domain::repositories::PlaygroundRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_playground;

/// Database row shape for the `playgrounds` table.
#[derive(FromRow)]
struct PlaygroundRow {
    id: i64,
    realm_id: i64,
    name: String,
    pygments_language: String,
    url_prefix: String,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<PlaygroundRow> for Playground {
    fn from(row: PlaygroundRow) -> Self {
        Playground::new(
            row.id,
            row.realm_id,
            row.name,
            row.pygments_language,
            row.url_prefix,
            row.created_by,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for realm playground records.
///
/// The `(realm_id, pygments_language, name)` uniqueness constraint is the
/// single arbiter for concurrent creates; the insert maps its violation to
/// the user-visible conflict message.
pub struct PgPlaygroundRepository {
    pool: Arc<PgPool>,
}

impl PgPlaygroundRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaygroundRepository for PgPlaygroundRepository {
    async fn create(&self, new_playground: NewPlayground) -> Result<Playground, AppError> {
        let row = sqlx::query_as::<_, PlaygroundRow>(
            r#"
            INSERT INTO playgrounds (realm_id, name, pygments_language, url_prefix, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, realm_id, name, pygments_language, url_prefix, created_by, created_at
            "#,
        )
        .bind(new_playground.realm_id)
        .bind(&new_playground.name)
        .bind(&new_playground.pygments_language)
        .bind(&new_playground.url_prefix)
        .bind(new_playground.created_by)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_playground(&e) {
                AppError::validation(
                    "Realm playground with this Realm, Pygments language and Name already exists.",
                )
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, realm_id: i64, id: i64) -> Result<Option<Playground>, AppError> {
        let row = sqlx::query_as::<_, PlaygroundRow>(
            r#"
            SELECT id, realm_id, name, pygments_language, url_prefix, created_by, created_at
            FROM playgrounds
            WHERE realm_id = $1 AND id = $2
            "#,
        )
        .bind(realm_id)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Playground::from))
    }

    async fn list_for_realm(&self, realm_id: i64) -> Result<Vec<Playground>, AppError> {
        let rows = sqlx::query_as::<_, PlaygroundRow>(
            r#"
            SELECT id, realm_id, name, pygments_language, url_prefix, created_by, created_at
            FROM playgrounds
            WHERE realm_id = $1
            ORDER BY id
            "#,
        )
        .bind(realm_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Playground::from).collect())
    }

    async fn delete(&self, realm_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM playgrounds
            WHERE realm_id = $1 AND id = $2
            "#,
        )
        .bind(realm_id)
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playgrounds")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
