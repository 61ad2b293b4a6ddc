mod common;

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use playground_registry::domain::entities::Playground;
use playground_registry::domain::realm_event::RealmEvent;
use playground_registry::domain::repositories::AuditLogRepository;
use playground_registry::infrastructure::persistence::PgAuditLogRepository;

fn added_event(realm_id: i64, acting_user_id: i64, playground_id: i64, name: &str) -> RealmEvent {
    let playground = Playground::new(
        playground_id,
        realm_id,
        name.to_string(),
        "Python".to_string(),
        "https://python.example.com".to_string(),
        Some(acting_user_id),
        Utc::now(),
    );
    RealmEvent::playground_added(acting_user_id, &playground)
}

#[sqlx::test]
async fn test_record_and_list(pool: PgPool) {
    let realm_id = common::create_test_realm(&pool, "zulip").await;
    let user_id =
        common::create_test_user(&pool, realm_id, "iago@zulip.testserver", "administrator").await;
    let repo = PgAuditLogRepository::new(Arc::new(pool));

    repo.record(&added_event(realm_id, user_id, 1, "Python playground"))
        .await
        .unwrap();

    let entries = repo.list_recent(realm_id, 10).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].realm_id, realm_id);
    assert_eq!(entries[0].acting_user_id, user_id);
    assert_eq!(entries[0].event_type, "playground_added");
    assert_eq!(entries[0].payload["name"], "Python playground");
}

#[sqlx::test]
async fn test_list_recent_newest_first(pool: PgPool) {
    let realm_id = common::create_test_realm(&pool, "zulip").await;
    let user_id =
        common::create_test_user(&pool, realm_id, "iago@zulip.testserver", "administrator").await;
    let repo = PgAuditLogRepository::new(Arc::new(pool));

    for i in 1..=3 {
        repo.record(&added_event(realm_id, user_id, i, &format!("playground-{i}")))
            .await
            .unwrap();
    }

    let entries = repo.list_recent(realm_id, 2).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].payload["name"], "playground-3");
    assert_eq!(entries[1].payload["name"], "playground-2");
}

#[sqlx::test]
async fn test_list_recent_is_realm_scoped(pool: PgPool) {
    let zulip_id = common::create_test_realm(&pool, "zulip").await;
    let lear_id = common::create_test_realm(&pool, "lear").await;
    let user_id =
        common::create_test_user(&pool, zulip_id, "iago@zulip.testserver", "administrator").await;
    let repo = PgAuditLogRepository::new(Arc::new(pool));

    repo.record(&added_event(zulip_id, user_id, 1, "Python playground"))
        .await
        .unwrap();

    let entries = repo.list_recent(lear_id, 10).await.unwrap();
    assert!(entries.is_empty());
}
