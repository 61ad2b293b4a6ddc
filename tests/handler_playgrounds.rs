mod common;

use axum::{Router, middleware};
use axum_test::TestServer;
use playground_registry::api::middleware::auth;
use playground_registry::api::routes::protected_routes;
use playground_registry::domain::realm_event::{RealmEvent, RealmEventType};
use serde_json::json;
use sqlx::PgPool;
use tokio::sync::mpsc;

fn make_server(pool: PgPool) -> (TestServer, mpsc::Receiver<RealmEvent>) {
    let (state, rx) = common::create_test_state(pool);
    let app = Router::new()
        .nest(
            "/api/v1",
            protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state);
    (TestServer::new(app).unwrap(), rx)
}

/// Seeds a realm with an administrator and a plain member, returning
/// `(realm_id, admin_token, member_token)`.
async fn seed_realm(pool: &PgPool, name: &str) -> (i64, String, String) {
    let realm_id = common::create_test_realm(pool, name).await;

    let admin_id = common::create_test_user(
        pool,
        realm_id,
        &format!("iago@{name}.testserver"),
        "administrator",
    )
    .await;
    let member_id = common::create_test_user(
        pool,
        realm_id,
        &format!("hamlet@{name}.testserver"),
        "member",
    )
    .await;

    let admin_token = common::issue_token(pool, admin_id, &format!("{name}-admin-token")).await;
    let member_token = common::issue_token(pool, member_id, &format!("{name}-member-token")).await;

    (realm_id, admin_token, member_token)
}

fn assert_json_error(response: &axum_test::TestResponse, msg: &str) {
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["result"], "error");
    assert_eq!(body["msg"], msg);
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_one_playground_entry(pool: PgPool) {
    let (realm_id, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool.clone());

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Python playground",
            "pygments_language": "Python",
            "url_prefix": "https://python.example.com",
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["result"], "success");
    assert!(body["id"].is_i64());

    // Check if the actual record exists
    assert!(common::playground_exists(&pool, realm_id, "Python playground").await);
}

#[sqlx::test]
async fn test_create_multiple_playgrounds_for_same_language(pool: PgPool) {
    let (realm_id, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool.clone());

    for (name, url_prefix) in [
        ("Python playground 1", "https://python.example.com"),
        ("Python playground 2", "https://python2.example.com"),
    ] {
        let response = server
            .post("/api/v1/realm/playgrounds")
            .authorization_bearer(&admin_token)
            .json(&json!({
                "name": name,
                "pygments_language": "Python",
                "url_prefix": url_prefix,
            }))
            .await;

        response.assert_status_ok();
    }

    assert!(common::playground_exists(&pool, realm_id, "Python playground 1").await);
    assert!(common::playground_exists(&pool, realm_id, "Python playground 2").await);
}

#[sqlx::test]
async fn test_invalid_url_prefix(pool: PgPool) {
    let (_, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool);

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Invalid URL",
            "pygments_language": "Python",
            "url_prefix": "https://invalid-url",
        }))
        .await;

    assert_json_error(&response, "url_prefix is not a URL");
}

#[sqlx::test]
async fn test_invalid_pygments_language(pool: PgPool) {
    let (realm_id, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool.clone());

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Invalid language",
            "pygments_language": "a$b$c",
            "url_prefix": "https://python.example.com",
        }))
        .await;

    assert_json_error(&response, "Invalid characters in pygments language");
    assert_eq!(common::count_playgrounds(&pool, realm_id).await, 0);
}

#[sqlx::test]
async fn test_unexpected_template_variable(pool: PgPool) {
    let (_, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool);

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Template with an unexpected variable",
            "pygments_language": "Python",
            "url_prefix": "https://template.example.com?test={test}",
        }))
        .await;

    assert_json_error(
        &response,
        "\"code\" should be the only variable present in the URL template",
    );
}

#[sqlx::test]
async fn test_malformed_url_template(pool: PgPool) {
    let (_, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool);

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Invalid URL template",
            "pygments_language": "Python",
            "url_prefix": "https://template.example.com?test={test",
        }))
        .await;

    assert_json_error(&response, "Invalid URL template.");
}

#[sqlx::test]
async fn test_create_already_existing_playground(pool: PgPool) {
    let (_, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool);

    let payload = json!({
        "name": "Python playground",
        "pygments_language": "Python",
        "url_prefix": "https://python.example.com",
    });

    server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&payload)
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&payload)
        .await;

    assert_json_error(
        &response,
        "Realm playground with this Realm, Pygments language and Name already exists.",
    );
}

#[sqlx::test]
async fn test_create_emits_audit_event(pool: PgPool) {
    let (realm_id, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, mut rx) = make_server(pool);

    server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Python playground",
            "pygments_language": "Python",
            "url_prefix": "https://python.example.com",
        }))
        .await
        .assert_status_ok();

    let event = rx.try_recv().expect("audit event should be enqueued");
    assert_eq!(event.event_type, RealmEventType::PlaygroundAdded);
    assert_eq!(event.realm_id, realm_id);
    assert_eq!(event.payload["name"], "Python playground");
}

// ─── AUTHORIZATION ───────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_not_realm_admin(pool: PgPool) {
    let (realm_id, _, member_token) = seed_realm(&pool, "zulip").await;
    let (server, mut rx) = make_server(pool.clone());

    // The role check runs before body parsing, so no payload is needed.
    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&member_token)
        .await;

    assert_json_error(&response, "Must be an organization administrator");

    let response = server
        .delete("/api/v1/realm/playgrounds/1")
        .authorization_bearer(&member_token)
        .await;

    assert_json_error(&response, "Must be an organization administrator");

    // No side effects
    assert_eq!(common::count_playgrounds(&pool, realm_id).await, 0);
    assert!(rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_moderator_is_not_admin(pool: PgPool) {
    let realm_id = common::create_test_realm(&pool, "zulip").await;
    let moderator_id =
        common::create_test_user(&pool, realm_id, "shiva@zulip.testserver", "moderator").await;
    let token = common::issue_token(&pool, moderator_id, "moderator-token").await;

    let (server, _rx) = make_server(pool);

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&token)
        .await;

    assert_json_error(&response, "Must be an organization administrator");
}

#[sqlx::test]
async fn test_unauthenticated_request(pool: PgPool) {
    let (server, _rx) = make_server(pool);

    let response = server.post("/api/v1/realm/playgrounds").await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["result"], "error");
    assert_eq!(body["msg"], "Invalid API key");
}

#[sqlx::test]
async fn test_revoked_token_rejected(pool: PgPool) {
    let (_, admin_token, _) = seed_realm(&pool, "zulip").await;

    sqlx::query("UPDATE api_tokens SET revoked_at = NOW() WHERE token_hash = $1")
        .bind(common::hash_token(&admin_token))
        .execute(&pool)
        .await
        .unwrap();

    let (server, _rx) = make_server(pool);

    let response = server
        .get("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_realm_playground(pool: PgPool) {
    let (realm_id, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool.clone());

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Python playground",
            "pygments_language": "Python",
            "url_prefix": "https://python.example.com",
        }))
        .await;

    response.assert_status_ok();
    let playground_id = response.json::<serde_json::Value>()["id"].as_i64().unwrap();

    assert!(common::playground_exists(&pool, realm_id, "Python playground").await);

    // One past the last assigned id
    let response = server
        .delete(&format!("/api/v1/realm/playgrounds/{}", playground_id + 1))
        .authorization_bearer(&admin_token)
        .await;

    assert_json_error(&response, "Invalid playground");

    let response = server
        .delete(&format!("/api/v1/realm/playgrounds/{playground_id}"))
        .authorization_bearer(&admin_token)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["result"],
        "success"
    );

    assert!(!common::playground_exists(&pool, realm_id, "Python playground").await);
}

#[sqlx::test]
async fn test_delete_emits_audit_event(pool: PgPool) {
    let (_, admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, mut rx) = make_server(pool);

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Python playground",
            "pygments_language": "Python",
            "url_prefix": "https://python.example.com",
        }))
        .await;
    let playground_id = response.json::<serde_json::Value>()["id"].as_i64().unwrap();
    let _ = rx.try_recv();

    server
        .delete(&format!("/api/v1/realm/playgrounds/{playground_id}"))
        .authorization_bearer(&admin_token)
        .await
        .assert_status_ok();

    let event = rx.try_recv().expect("audit event should be enqueued");
    assert_eq!(event.event_type, RealmEventType::PlaygroundRemoved);
    assert_eq!(event.payload["id"], playground_id);
}

#[sqlx::test]
async fn test_delete_is_scoped_to_own_realm(pool: PgPool) {
    let (lear_realm_id, lear_admin_token, _) = seed_realm(&pool, "lear").await;
    let (_, zulip_admin_token, _) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool.clone());

    let response = server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&lear_admin_token)
        .json(&json!({
            "name": "Python playground",
            "pygments_language": "Python",
            "url_prefix": "https://python.example.com",
        }))
        .await;
    let playground_id = response.json::<serde_json::Value>()["id"].as_i64().unwrap();

    // Another realm's administrator cannot delete it, id reuse or not.
    let response = server
        .delete(&format!("/api/v1/realm/playgrounds/{playground_id}"))
        .authorization_bearer(&zulip_admin_token)
        .await;

    assert_json_error(&response, "Invalid playground");
    assert!(common::playground_exists(&pool, lear_realm_id, "Python playground").await);
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_playgrounds(pool: PgPool) {
    let (_, admin_token, member_token) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool);

    for (name, language, url_prefix) in [
        ("Python playground", "Python", "https://python.example.com"),
        (
            "Rust playground",
            "Rust",
            "https://play.rust-lang.org/?code={code}",
        ),
    ] {
        server
            .post("/api/v1/realm/playgrounds")
            .authorization_bearer(&admin_token)
            .json(&json!({
                "name": name,
                "pygments_language": language,
                "url_prefix": url_prefix,
            }))
            .await
            .assert_status_ok();
    }

    // Listing does not require the admin role.
    let response = server
        .get("/api/v1/realm/playgrounds")
        .authorization_bearer(&member_token)
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["result"], "success");

    let playgrounds = body["playgrounds"].as_array().unwrap();
    assert_eq!(playgrounds.len(), 2);
    assert_eq!(playgrounds[0]["name"], "Python playground");
    assert_eq!(playgrounds[1]["name"], "Rust playground");
    assert_eq!(
        playgrounds[1]["url_prefix"],
        "https://play.rust-lang.org/?code={code}"
    );
}

#[sqlx::test]
async fn test_list_is_scoped_to_own_realm(pool: PgPool) {
    let (_, lear_admin_token, _) = seed_realm(&pool, "lear").await;
    let (_, _, zulip_member_token) = seed_realm(&pool, "zulip").await;
    let (server, _rx) = make_server(pool);

    server
        .post("/api/v1/realm/playgrounds")
        .authorization_bearer(&lear_admin_token)
        .json(&json!({
            "name": "Python playground",
            "pygments_language": "Python",
            "url_prefix": "https://python.example.com",
        }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/v1/realm/playgrounds")
        .authorization_bearer(&zulip_member_token)
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert!(body["playgrounds"].as_array().unwrap().is_empty());
}
