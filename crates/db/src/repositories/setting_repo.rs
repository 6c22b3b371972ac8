//! Repository for the `system_settings` table.

use chrono::Utc;

use crate::models::setting::{SystemSetting, UpsertSetting};
use crate::DbPool;

/// Column list for `system_settings` SELECT and RETURNING clauses.
const COLUMNS: &str = "id, key, value, description, created_at, updated_at";

/// Provides key/value access to system settings.
pub struct SettingRepo;

impl SettingRepo {
    /// List all settings ordered by key.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<SystemSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_settings ORDER BY key");
        sqlx::query_as::<_, SystemSetting>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a setting by key.
    pub async fn find_by_key(
        pool: &DbPool,
        key: &str,
    ) -> Result<Option<SystemSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_settings WHERE key = ?1");
        sqlx::query_as::<_, SystemSetting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert a setting, or replace the value and description of an
    /// existing one with the same key.
    pub async fn upsert(pool: &DbPool, dto: &UpsertSetting) -> Result<SystemSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO system_settings (key, value, description, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             ON CONFLICT (key) DO UPDATE SET \
                value = excluded.value, \
                description = excluded.description, \
                updated_at = excluded.updated_at \
             RETURNING {COLUMNS}"
        );

        sqlx::query_as::<_, SystemSetting>(&query)
            .bind(&dto.key)
            .bind(&dto.value)
            .bind(&dto.description)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Insert a setting only if its key is not present yet.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn insert_default(pool: &DbPool, dto: &UpsertSetting) -> Result<bool, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO system_settings (key, value, description, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             ON CONFLICT (key) DO NOTHING",
        )
        .bind(&dto.key)
        .bind(&dto.value)
        .bind(&dto.description)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
