//! Repository for the `apps` table.
//!
//! Positions are kept unique and contiguous from 1: inserts append at the
//! end, deletes close the gap, and reorders rewrite the whole sequence.

use appdeck_core::types::DbId;
use chrono::Utc;

use crate::models::script::{CreateScript, Script, UpdateScript};
use crate::DbPool;

/// Column list for `apps` SELECT and RETURNING clauses.
const COLUMNS: &str = "\
    id, name, tags, description, params, code, position, created_at, updated_at";

/// Provides CRUD and ordering operations for stored scripts.
pub struct ScriptRepo;

impl ScriptRepo {
    /// Insert a new script at the end of the list.
    pub async fn create(pool: &DbPool, dto: &CreateScript) -> Result<Script, sqlx::Error> {
        let query = format!(
            "INSERT INTO apps \
                (name, tags, description, params, code, position, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, \
                (SELECT COALESCE(MAX(position), 0) + 1 FROM apps), ?6, ?6) \
             RETURNING {COLUMNS}"
        );

        sqlx::query_as::<_, Script>(&query)
            .bind(&dto.name)
            .bind(&dto.tags)
            .bind(&dto.description)
            .bind(&dto.params)
            .bind(&dto.code)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a script by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM apps WHERE id = ?1");
        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all scripts in position order.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM apps ORDER BY position ASC, id ASC");
        sqlx::query_as::<_, Script>(&query).fetch_all(pool).await
    }

    /// Replace a script's editable fields and bump `updated_at`.
    ///
    /// Returns `None` if no script has this ID.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        dto: &UpdateScript,
    ) -> Result<Option<Script>, sqlx::Error> {
        let query = format!(
            "UPDATE apps SET \
                name = ?2, \
                tags = ?3, \
                description = ?4, \
                params = ?5, \
                code = ?6, \
                updated_at = ?7 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );

        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.tags)
            .bind(&dto.description)
            .bind(&dto.params)
            .bind(&dto.code)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a script and shift every later script up by one position.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let position: Option<i64> = sqlx::query_scalar("SELECT position FROM apps WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(position) = position else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM apps WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE apps SET position = position - 1 WHERE position > ?1")
            .bind(position)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Assign positions `1..=n` following the order of `ids`.
    ///
    /// `ids` must name every stored script exactly once; otherwise nothing
    /// is changed and `false` is returned.
    pub async fn reorder(pool: &DbPool, ids: &[DbId]) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut existing: Vec<DbId> = sqlx::query_scalar("SELECT id FROM apps")
            .fetch_all(&mut *tx)
            .await?;
        existing.sort_unstable();

        let mut requested = ids.to_vec();
        requested.sort_unstable();

        if existing != requested {
            tracing::warn!(
                requested = ids.len(),
                stored = existing.len(),
                "Rejected reorder that does not cover every script exactly once"
            );
            return Ok(false);
        }

        for (index, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE apps SET position = ?1 WHERE id = ?2")
                .bind(index as i64 + 1)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
