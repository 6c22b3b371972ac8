//! Python script executor.
//!
//! Writes the combined source to a [`TransientUnit`], runs the configured
//! interpreter against it, and removes the file once the run is over.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use super::executor::{Attempt, ExecutionOutcome, ExecutorError, ScriptExecutor, ScriptInput};
use super::subprocess;
use super::transient::TransientUnit;
use crate::config::ExecutorConfig;

/// Executor for Python scripts, one fresh file and process per run.
#[derive(Debug, Clone)]
pub struct PythonExecutor {
    interpreter: String,
    temp_dir: PathBuf,
    input: ScriptInput,
}

impl PythonExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            temp_dir: config.temp_dir.clone(),
            input: ScriptInput {
                env_vars: vec![],
                working_directory: config.working_directory.clone(),
                timeout: config.timeout,
            },
        }
    }

    /// Add an environment variable passed to every child process.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.input.env_vars.push((key.into(), value.into()));
        self
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl ScriptExecutor for PythonExecutor {
    async fn execute(&self, source: &str) -> Attempt {
        let unit = match TransientUnit::materialize(&self.temp_dir, source).await {
            Ok(unit) => unit,
            Err(e) => {
                return Attempt {
                    command_line: self.interpreter.clone(),
                    outcome: ExecutorError::Materialize(e).into(),
                };
            }
        };

        let command_line = format!("{} {}", self.interpreter, unit.path().display());
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(unit.path());

        let outcome: ExecutionOutcome = match subprocess::run_command(&mut cmd, &self.input).await {
            Ok(output) => output.into(),
            Err(e) => e.into(),
        };

        unit.cleanup();

        Attempt {
            command_line,
            outcome,
        }
    }

    fn timeout(&self) -> Duration {
        self.input.timeout
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
