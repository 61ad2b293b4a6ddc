mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use playground_registry::api::handlers::health_handler;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_ok(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["event_queue"]["status"], "ok");
    assert!(body.get("version").is_some());
}

#[sqlx::test]
async fn test_health_degraded_when_queue_closed(pool: PgPool) {
    let (state, rx) = common::create_test_state(pool);

    // Dropping the receiver closes the audit channel.
    drop(rx);

    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["event_queue"]["status"], "error");
}
