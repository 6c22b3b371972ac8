//! Store collaborator consumed by the execution orchestrator.
//!
//! The orchestrator receives an `Arc<dyn ScriptStore>` at construction time
//! instead of reaching for a global connection. [`MemoryScriptStore`] is a
//! map-backed implementation for embedding and tests; the SQLite-backed one
//! lives in `appdeck-db`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::script::ScriptSource;
use crate::types::DbId;

/// Read-only script lookup used by the orchestrator.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Find a script by id. `Ok(None)` means the id is unknown.
    async fn find_script(&self, id: DbId) -> Result<Option<ScriptSource>, CoreError>;
}

/// In-memory [`ScriptStore`] keyed by script id.
#[derive(Debug, Default)]
pub struct MemoryScriptStore {
    scripts: RwLock<HashMap<DbId, ScriptSource>>,
}

impl MemoryScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a script, keyed by its id.
    pub async fn insert(&self, script: ScriptSource) {
        self.scripts.write().await.insert(script.id, script);
    }
}

#[async_trait]
impl ScriptStore for MemoryScriptStore {
    async fn find_script(&self, id: DbId) -> Result<Option<ScriptSource>, CoreError> {
        Ok(self.scripts.read().await.get(&id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
