//! System setting entity model and DTOs.

use appdeck_core::error::CoreError;
use appdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Validation message for a setting without a key.
pub const MISSING_SETTING_KEY: &str = "设置项名称不能为空";

/// Key of the setting that records where the database file lives.
pub const SQLITE_PATH_KEY: &str = "sqlite_path";

/// A row in the `system_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemSetting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or replacing a setting by key.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSetting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

impl UpsertSetting {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.key.trim().is_empty() {
            return Err(CoreError::Validation(MISSING_SETTING_KEY.to_string()));
        }
        Ok(())
    }
}
