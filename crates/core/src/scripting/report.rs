//! Caller-facing execution results.
//!
//! [`ExecutionResult`] is what the orchestrator hands back for every run
//! that got past the store lookup. Non-zero exits, timeouts and launch
//! failures are all ordinary results; only `success` tells them apart from
//! a clean run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::executor::{Attempt, ExecutionOutcome};
use crate::script::ScriptSource;

/// Separator placed between stdout and stderr in the combined output.
pub const STDERR_HEADER: &str = "\n\n错误信息:\n";

/// Label that starts every console transcript.
pub const COMMAND_HEADER: &str = "执行命令: ";

/// Exit code reported when the process never completed.
pub const NO_EXIT_CODE: i32 = -1;

/// Result of one script run, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// `true` only when the script completed with exit code 0.
    pub success: bool,
    /// Stdout, followed by stderr under [`STDERR_HEADER`] when non-empty.
    pub output: String,
    /// Process exit code, or [`NO_EXIT_CODE`] for timeouts and launch failures.
    pub exit_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Full diagnostic trace for launch failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Command line followed by the output, for display and audit.
    pub console_output: String,
}

impl ExecutionResult {
    /// Map an attempt to the caller-facing result.
    ///
    /// `timeout` is only used to word the timeout message.
    pub fn from_attempt(attempt: &Attempt, timeout: Duration) -> Self {
        let (success, output, exit_code, error, details) = match &attempt.outcome {
            ExecutionOutcome::Completed {
                exit_code,
                stdout,
                stderr,
                ..
            } => (
                *exit_code == 0,
                compose_output(stdout, stderr),
                *exit_code,
                None,
                None,
            ),
            ExecutionOutcome::TimedOut { .. } => (
                false,
                String::new(),
                NO_EXIT_CODE,
                Some(timeout_message(timeout)),
                None,
            ),
            ExecutionOutcome::LaunchFailed { error, details } => (
                false,
                String::new(),
                NO_EXIT_CODE,
                Some(error.clone()),
                Some(details.clone()),
            ),
        };

        let console_output = format!("{COMMAND_HEADER}{}\n\n{output}", attempt.command_line);

        Self {
            success,
            output,
            exit_code,
            error,
            details,
            console_output,
        }
    }
}

/// Combine stdout and stderr the way results present them.
pub fn compose_output(stdout: &str, stderr: &str) -> String {
    if stderr.is_empty() {
        stdout.to_string()
    } else {
        format!("{stdout}{STDERR_HEADER}{stderr}")
    }
}

/// User-facing message for a run that hit the timeout.
pub fn timeout_message(timeout: Duration) -> String {
    format!("执行超时（超过{}秒）", timeout.as_secs_f64())
}

/// Record a finished run for operational visibility.
pub fn log_result(script: &ScriptSource, result: &ExecutionResult) {
    let executed_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    if result.error.is_none() {
        tracing::info!(
            script_id = script.id,
            script_name = %script.name,
            executed_at = %executed_at,
            exit_code = result.exit_code,
            output = %result.output,
            "Script execution finished",
        );
    } else {
        tracing::error!(
            script_id = script.id,
            script_name = %script.name,
            executed_at = %executed_at,
            exit_code = result.exit_code,
            error = result.error.as_deref().unwrap_or_default(),
            details = result.details.as_deref().unwrap_or_default(),
            "Script execution failed",
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    fn attempt(outcome: ExecutionOutcome) -> Attempt {
        Attempt {
            command_line: "python3 /tmp/appdeck-abc.py".to_string(),
            outcome,
        }
    }

    fn completed(exit_code: i32, stdout: &str, stderr: &str) -> ExecutionOutcome {
        ExecutionOutcome::Completed {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            duration_ms: 12,
        }
    }

    #[test]
    fn clean_exit_is_success() {
        let result = ExecutionResult::from_attempt(&attempt(completed(0, "hello\n", "")), TIMEOUT);
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.output, "hello\n");
        assert_eq!(result.error, None);
        assert_eq!(result.details, None);
        assert_eq!(
            result.console_output,
            "执行命令: python3 /tmp/appdeck-abc.py\n\nhello\n"
        );
    }

    #[test]
    fn stderr_is_appended_even_on_success() {
        let result =
            ExecutionResult::from_attempt(&attempt(completed(0, "ok\n", "warning\n")), TIMEOUT);
        assert!(result.success);
        assert_eq!(result.output, "ok\n\n\n错误信息:\nwarning\n");
    }

    #[test]
    fn nonzero_exit_keeps_stdout_only_output() {
        let result = ExecutionResult::from_attempt(&attempt(completed(2, "partial\n", "")), TIMEOUT);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.output, "partial\n");
        assert_eq!(result.error, None);
    }

    #[test]
    fn timeout_reports_fixed_message() {
        let result = ExecutionResult::from_attempt(
            &attempt(ExecutionOutcome::TimedOut { elapsed_ms: 30_001 }),
            TIMEOUT,
        );
        assert!(!result.success);
        assert_eq!(result.exit_code, NO_EXIT_CODE);
        assert_eq!(result.output, "");
        assert_eq!(result.error.as_deref(), Some("执行超时（超过30秒）"));
        assert_eq!(result.details, None);
        assert_eq!(
            result.console_output,
            "执行命令: python3 /tmp/appdeck-abc.py\n\n"
        );
    }

    #[test]
    fn launch_failure_carries_details() {
        let result = ExecutionResult::from_attempt(
            &attempt(ExecutionOutcome::LaunchFailed {
                error: "failed to spawn python3: not found".to_string(),
                details: "Spawn { .. }\ncaused by: not found".to_string(),
            }),
            TIMEOUT,
        );
        assert!(!result.success);
        assert_eq!(result.exit_code, NO_EXIT_CODE);
        assert_eq!(result.output, "");
        assert_eq!(
            result.error.as_deref(),
            Some("failed to spawn python3: not found")
        );
        assert!(result.details.as_deref().unwrap_or_default().contains("caused by"));
    }

    #[test]
    fn fractional_timeouts_are_worded_exactly() {
        assert_eq!(timeout_message(Duration::from_millis(1500)), "执行超时（超过1.5秒）");
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let result = ExecutionResult::from_attempt(&attempt(completed(0, "x", "")), TIMEOUT);
        let json = serde_json::to_value(&result).expect("serialize");
        assert!(json.get("error").is_none());
        assert!(json.get("details").is_none());
        assert_eq!(json["success"], true);
        assert_eq!(json["exit_code"], 0);
    }
}
