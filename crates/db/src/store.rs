//! SQLite-backed [`ScriptStore`] used by the execution orchestrator.

use appdeck_core::error::CoreError;
use appdeck_core::script::ScriptSource;
use appdeck_core::store::ScriptStore;
use appdeck_core::types::DbId;
use async_trait::async_trait;

use crate::repositories::ScriptRepo;
use crate::DbPool;

/// Read-only script lookup over the `apps` table.
#[derive(Debug, Clone)]
pub struct SqlScriptStore {
    pool: DbPool,
}

impl SqlScriptStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScriptStore for SqlScriptStore {
    async fn find_script(&self, id: DbId) -> Result<Option<ScriptSource>, CoreError> {
        ScriptRepo::find_by_id(&self.pool, id)
            .await
            .map(|script| script.map(ScriptSource::from))
            .map_err(|e| {
                tracing::error!(script_id = id, error = %e, "Script lookup failed");
                CoreError::Internal(format!("script lookup failed: {e}"))
            })
    }
}
