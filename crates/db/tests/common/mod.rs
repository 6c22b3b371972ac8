//! Shared helpers for repository integration tests.

use std::time::Duration;

use appdeck_db::DbPool;
use sqlx::sqlite::SqlitePoolOptions;

/// Open a private in-memory database with all migrations applied.
///
/// The pool is limited to one connection that is never recycled, because
/// every new connection to `sqlite::memory:` would see an empty database.
pub async fn test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(5))
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    appdeck_db::run_migrations(&pool)
        .await
        .expect("apply migrations");
    pool
}
