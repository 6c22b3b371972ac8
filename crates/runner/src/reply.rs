//! Replies printed by the runner.
//!
//! Every script that was found produces the full [`ExecutionResult`], even
//! when it failed. Only lookup problems collapse into a short message.
//! Other subcommands reply with the affected records as JSON data.

use appdeck_core::error::CoreError;
use appdeck_core::scripting::report::ExecutionResult;
use serde::Serialize;

/// Message printed when the requested script does not exist.
pub const NOT_FOUND_MESSAGE: &str = "应用不存在";

/// Coarse classification of a reply, mirrored in the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    NotFound,
    Error,
}

impl ReplyStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            ReplyStatus::Ok => 0,
            ReplyStatus::NotFound => 1,
            ReplyStatus::Error => 2,
        }
    }
}

/// JSON body of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    Executed(ExecutionResult),
    Message { success: bool, message: String },
    Data(serde_json::Value),
}

impl ReplyBody {
    pub fn failure(message: impl Into<String>) -> Self {
        ReplyBody::Message {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: ReplyStatus,
    pub body: ReplyBody,
}

impl Reply {
    /// Successful reply carrying `data` as its JSON body.
    pub fn data(data: serde_json::Value) -> Self {
        Self {
            status: ReplyStatus::Ok,
            body: ReplyBody::Data(data),
        }
    }

    /// Rejected request, such as failed validation.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            body: ReplyBody::failure(message),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: ReplyStatus::NotFound,
            body: ReplyBody::failure(NOT_FOUND_MESSAGE),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

/// Build the reply for one `run_script` call.
pub fn execution_reply(result: Result<ExecutionResult, CoreError>) -> Reply {
    match result {
        Ok(result) => Reply {
            status: ReplyStatus::Ok,
            body: ReplyBody::Executed(result),
        },
        Err(err) if err.is_not_found() => Reply::not_found(),
        Err(err) => {
            tracing::error!(error = %err, "Script run failed before execution");
            Reply::error(err.to_string())
        }
    }
}
