//! The engine's read-only view of a stored script, plus field validation
//! shared by every store implementation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Message returned when a script is saved without a name or code body.
pub const MISSING_NAME_OR_CODE: &str = "应用名称和代码不能为空";

/// The subset of a stored script that execution needs.
///
/// `params` is the raw stored text. It may be absent, blank, or not valid
/// JSON at all; the parameter injector decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSource {
    pub id: DbId,
    pub name: String,
    pub params: Option<String>,
    pub code: String,
}

/// Validate the required fields of a script before it is stored.
///
/// Both `name` and `code` must contain at least one non-whitespace character.
pub fn validate_script_fields(name: &str, code: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() || code.trim().is_empty() {
        return Err(CoreError::Validation(MISSING_NAME_OR_CODE.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
