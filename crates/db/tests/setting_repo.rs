//! Integration tests for the system settings repository.

mod common;

use appdeck_db::models::setting::{UpsertSetting, MISSING_SETTING_KEY, SQLITE_PATH_KEY};
use appdeck_db::repositories::SettingRepo;

fn setting(key: &str, value: &str, description: Option<&str>) -> UpsertSetting {
    UpsertSetting {
        key: key.to_string(),
        value: value.to_string(),
        description: description.map(str::to_string),
    }
}

#[tokio::test]
async fn health_check_passes_on_fresh_database() {
    let pool = common::test_pool().await;
    appdeck_db::health_check(&pool).await.expect("health check");
}

#[tokio::test]
async fn upsert_inserts_then_replaces() {
    let pool = common::test_pool().await;

    let first = SettingRepo::upsert(&pool, &setting("theme", "dark", Some("UI theme")))
        .await
        .expect("insert");
    let second = SettingRepo::upsert(&pool, &setting("theme", "light", None))
        .await
        .expect("replace");

    assert_eq!(first.id, second.id);
    assert_eq!(second.value, "light");
    assert_eq!(second.description, None);
    assert_eq!(SettingRepo::list_all(&pool).await.expect("list").len(), 1);
}

#[tokio::test]
async fn insert_default_keeps_existing_value() {
    let pool = common::test_pool().await;

    let inserted = SettingRepo::insert_default(
        &pool,
        &setting(SQLITE_PATH_KEY, "apps.db", Some("SQLite数据库文件路径")),
    )
    .await
    .expect("seed");
    let again = SettingRepo::insert_default(&pool, &setting(SQLITE_PATH_KEY, "other.db", None))
        .await
        .expect("seed again");

    assert!(inserted);
    assert!(!again);
    let stored = SettingRepo::find_by_key(&pool, SQLITE_PATH_KEY)
        .await
        .expect("query")
        .expect("seeded");
    assert_eq!(stored.value, "apps.db");
}

#[tokio::test]
async fn list_is_ordered_by_key() {
    let pool = common::test_pool().await;
    for key in ["zeta", "alpha", "mid"] {
        SettingRepo::upsert(&pool, &setting(key, "1", None))
            .await
            .expect("upsert");
    }

    let keys: Vec<String> = SettingRepo::list_all(&pool)
        .await
        .expect("list")
        .into_iter()
        .map(|s| s.key)
        .collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
}

#[tokio::test]
async fn find_unknown_key_is_none() {
    let pool = common::test_pool().await;
    assert!(SettingRepo::find_by_key(&pool, "missing")
        .await
        .expect("query")
        .is_none());
}

#[test]
fn upsert_validation_requires_a_key() {
    assert!(setting("theme", "dark", None).validate().is_ok());
    let err = setting(" ", "dark", None)
        .validate()
        .expect_err("blank key must be rejected");
    assert!(err.to_string().contains(MISSING_SETTING_KEY));
}
