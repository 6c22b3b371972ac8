//! Execution interface and shared types.
//!
//! Defines [`ScriptExecutor`], the trait the orchestrator drives, along with
//! [`ScriptInput`], [`ProcessOutput`], [`ExecutorError`], and the
//! [`ExecutionOutcome`] taxonomy every run is reduced to.

use std::error::Error as _;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Process-level settings for one child process.
#[derive(Debug, Clone)]
pub struct ScriptInput {
    /// Extra environment variables set on top of the controlled base set.
    pub env_vars: Vec<(String, String)>,
    /// Working directory for the child process (uses current dir if `None`).
    pub working_directory: Option<PathBuf>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

/// Captured output from a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Errors that can occur while running a script.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// The transient script file could not be created or written.
    #[error("failed to write transient script: {0}")]
    Materialize(#[source] std::io::Error),
    /// The interpreter process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Waiting on the running process failed.
    #[error("failed to wait for script process: {0}")]
    Wait(#[source] std::io::Error),
    /// The script exceeded its configured timeout and was killed.
    #[error("script timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },
}

impl ExecutorError {
    /// Full diagnostic trace: debug form, `source()` chain, and a backtrace
    /// when `RUST_BACKTRACE` enables one.
    pub fn diagnostic(&self) -> String {
        let mut trace = format!("{self:?}");
        let mut source = self.source();
        while let Some(cause) = source {
            trace.push_str(&format!("\ncaused by: {cause}"));
            source = cause.source();
        }
        let backtrace = std::backtrace::Backtrace::capture();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            trace.push_str(&format!("\nbacktrace:\n{backtrace}"));
        }
        trace
    }
}

/// Raw result category of one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The process ran and exited, with any exit code.
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
        duration_ms: u64,
    },
    /// The process exceeded the timeout and was killed.
    TimedOut { elapsed_ms: u64 },
    /// The process could not be started.
    LaunchFailed { error: String, details: String },
}

impl ExecutionOutcome {
    /// Whether the run completed with exit code 0.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { exit_code: 0, .. })
    }
}

impl From<ProcessOutput> for ExecutionOutcome {
    fn from(output: ProcessOutput) -> Self {
        Self::Completed {
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            duration_ms: output.duration_ms,
        }
    }
}

impl From<ExecutorError> for ExecutionOutcome {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::Timeout { elapsed_ms } => Self::TimedOut { elapsed_ms },
            other => Self::LaunchFailed {
                error: other.to_string(),
                details: other.diagnostic(),
            },
        }
    }
}

/// One execution attempt: the command line that was run and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub command_line: String,
    pub outcome: ExecutionOutcome,
}

/// Trait implemented by script runtime executors.
///
/// An executor receives the complete source to run and always produces an
/// [`Attempt`]; failures are encoded in the outcome rather than returned.
pub trait ScriptExecutor: Send + Sync {
    /// Execute `source` as a standalone unit.
    fn execute(&self, source: &str) -> impl std::future::Future<Output = Attempt> + Send;

    /// Timeout applied to every run, used in user-facing messages.
    fn timeout(&self) -> std::time::Duration;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
