//! Parameter injection for stored scripts.
//!
//! A script's stored parameters are a JSON object. Before execution they are
//! turned into a short Python prelude that exposes every key as an attribute
//! of a `SysParam` instance bound to [`PARAMS_BINDING`], so script bodies can
//! write `params.threshold` instead of parsing JSON themselves.
//!
//! The mapping travels as a JSON string literal decoded by the interpreter's
//! own `json` module. JSON string escapes are a subset of Python's, so the
//! literal is valid Python and every value round-trips unchanged.

use serde_json::{Map, Value};

/// Name the injected parameter object is bound to inside the script.
pub const PARAMS_BINDING: &str = "params";

/// Errors produced while interpreting stored parameter text.
///
/// These never escape [`inject_parameters`]; they are logged and execution
/// continues without a prelude.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// The text is not valid JSON.
    #[error("invalid parameter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The text is valid JSON but not an object.
    #[error("parameters must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
}

/// Parse stored parameter text.
///
/// Returns `Ok(None)` when the text is absent or blank.
pub fn parse_parameters(text: Option<&str>) -> Result<Option<Map<String, Value>>, ParameterError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(Some(map)),
        other => Err(ParameterError::NotAnObject {
            kind: json_kind(&other),
        }),
    }
}

/// Build the Python prelude that binds `params` to a `SysParam` object.
pub fn build_prelude(params: &Map<String, Value>) -> String {
    let payload = Value::Object(params.clone()).to_string();
    let literal = Value::String(payload).to_string();

    format!(
        "# 预设自定义参数\n\
         import json as _appdeck_json\n\
         \n\
         class SysParam:\n\
         \x20   def __init__(self, **kwargs):\n\
         \x20       for key, value in kwargs.items():\n\
         \x20           setattr(self, key, value)\n\
         \n\
         {PARAMS_BINDING} = SysParam(**_appdeck_json.loads({literal}))\n\
         del _appdeck_json\n\
         \n"
    )
}

/// Combine stored parameters and the script body into the source to run.
///
/// Blank parameters leave `code` untouched. Malformed or non-object
/// parameters are logged as a warning and also leave `code` untouched;
/// stored parameters never block execution.
pub fn inject_parameters(params: Option<&str>, code: &str) -> String {
    match parse_parameters(params) {
        Ok(None) => code.to_string(),
        Ok(Some(map)) => {
            tracing::debug!(keys = map.len(), "Injecting script parameters");
            let mut source = build_prelude(&map);
            source.push_str(code);
            source
        }
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed script parameters");
            code.to_string()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
