//! Script execution orchestrator.
//!
//! Runs one stored script per call:
//! 1. Fetch the script from the store (unknown id short-circuits).
//! 2. Inject the stored parameters into the source.
//! 3. Hand the source to the executor, which materializes, runs, collects
//!    and cleans up.
//! 4. Build and log the [`ExecutionResult`].
//!
//! The orchestrator holds no mutable state, so one instance can be shared
//! behind an `Arc` by any number of concurrent callers.

use std::sync::Arc;

use super::executor::ScriptExecutor;
use super::params::inject_parameters;
use super::python::PythonExecutor;
use super::report::{log_result, ExecutionResult};
use crate::config::ExecutorConfig;
use crate::error::CoreError;
use crate::store::ScriptStore;
use crate::types::DbId;

/// Entity name used in not-found errors.
const SCRIPT_ENTITY: &str = "script";

/// Coordinates store lookup, parameter injection, execution and reporting.
pub struct ScriptOrchestrator<E = PythonExecutor> {
    store: Arc<dyn ScriptStore>,
    executor: E,
}

impl ScriptOrchestrator<PythonExecutor> {
    /// Create an orchestrator running scripts with the Python executor.
    pub fn from_config(store: Arc<dyn ScriptStore>, config: &ExecutorConfig) -> Self {
        Self::new(store, PythonExecutor::new(config))
    }
}

impl<E: ScriptExecutor> ScriptOrchestrator<E> {
    pub fn new(store: Arc<dyn ScriptStore>, executor: E) -> Self {
        Self { store, executor }
    }

    /// Run a stored script by id.
    ///
    /// Returns [`CoreError::NotFound`] without starting a process when the
    /// id is unknown. Every outcome of an actual run, including timeouts and
    /// launch failures, is returned as `Ok`.
    pub async fn run_script(&self, script_id: DbId) -> Result<ExecutionResult, CoreError> {
        let script = self
            .store
            .find_script(script_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: SCRIPT_ENTITY,
                id: script_id,
            })?;

        let source = inject_parameters(script.params.as_deref(), &script.code);

        let attempt = self.executor.execute(&source).await;
        let result = ExecutionResult::from_attempt(&attempt, self.executor.timeout());

        log_result(&script, &result);
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
