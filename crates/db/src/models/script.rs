//! Stored script ("app") entity model and DTOs.

use appdeck_core::error::CoreError;
use appdeck_core::script::{validate_script_fields, ScriptSource};
use appdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row in the `apps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Script {
    pub id: DbId,
    pub name: String,
    pub tags: Option<String>,
    pub description: Option<String>,
    /// Raw JSON object text; not validated on write.
    pub params: Option<String>,
    pub code: String,
    /// 1-based display and execution order.
    pub position: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Script> for ScriptSource {
    fn from(script: Script) -> Self {
        Self {
            id: script.id,
            name: script.name,
            params: script.params,
            code: script.code,
        }
    }
}

/// DTO for inserting a new script. The position is assigned by the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScript {
    pub name: String,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub params: Option<String>,
    pub code: String,
}

impl CreateScript {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_script_fields(&self.name, &self.code)
    }
}

/// DTO for updating a script. Every editable field is replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScript {
    pub name: String,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub params: Option<String>,
    pub code: String,
}

impl UpdateScript {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_script_fields(&self.name, &self.code)
    }
}
