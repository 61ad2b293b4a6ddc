#![allow(dead_code)]

use hmac::{Hmac, Mac};
use playground_registry::application::services::{AuthService, PlaygroundService};
use sha2::Sha256;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use playground_registry::domain::realm_event::RealmEvent;
use playground_registry::infrastructure::persistence::{
    PgPlaygroundRepository, PgTokenRepository,
};
use playground_registry::state::AppState;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

pub async fn create_test_realm(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO realms (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_user(pool: &PgPool, realm_id: i64, email: &str, role: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (realm_id, email, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(realm_id)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Stores an API token for `user_id` and returns the raw value to send
/// as a bearer token.
pub async fn issue_token(pool: &PgPool, user_id: i64, raw_token: &str) -> String {
    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind("test token")
        .bind(hash_token(raw_token))
        .execute(pool)
        .await
        .unwrap();

    raw_token.to_string()
}

/// HMAC-SHA256 of a raw token under the test signing secret, matching the
/// server-side hashing in `AuthService`.
pub fn hash_token(raw_token: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_SIGNING_SECRET.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(raw_token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub async fn playground_exists(pool: &PgPool, realm_id: i64, name: &str) -> bool {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM playgrounds WHERE realm_id = $1 AND name = $2)",
    )
    .bind(realm_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_playgrounds(pool: &PgPool, realm_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM playgrounds WHERE realm_id = $1")
        .bind(realm_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<RealmEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let playground_repo = Arc::new(PgPlaygroundRepository::new(pool.clone()));
    let token_repo = Arc::new(PgTokenRepository::new(pool.clone()));

    let playground_service = Arc::new(PlaygroundService::new(playground_repo, tx.clone()));
    let auth_service = Arc::new(AuthService::new(
        token_repo,
        TEST_SIGNING_SECRET.to_string(),
    ));

    let state = AppState {
        playground_service,
        auth_service,
        event_tx: tx,
    };

    (state, rx)
}
