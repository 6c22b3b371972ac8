//! Subcommand handlers.
//!
//! Each handler returns a [`Reply`]; `main` prints its body and exits with
//! its code. Database failures are returned as errors and end the process
//! through `anyhow`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use appdeck_core::config::ExecutorConfig;
use appdeck_core::scripting::orchestrator::ScriptOrchestrator;
use appdeck_db::models::script::{CreateScript, UpdateScript};
use appdeck_db::models::setting::UpsertSetting;
use appdeck_db::repositories::{ScriptRepo, SettingRepo};
use appdeck_db::{DbPool, SqlScriptStore};

use crate::cli::Command;
use crate::reply::{execution_reply, Reply};

/// Message returned when a reorder does not list every script exactly once.
pub const REORDER_REJECTED: &str = "排序列表必须包含所有应用且不能重复";

/// Execute one subcommand against `pool`.
pub async fn dispatch(
    command: Command,
    pool: &DbPool,
    executor: &ExecutorConfig,
) -> anyhow::Result<Reply> {
    match command {
        Command::Run { id } => {
            let store = Arc::new(SqlScriptStore::new(pool.clone()));
            let orchestrator = ScriptOrchestrator::from_config(store, executor);
            Ok(execution_reply(orchestrator.run_script(id).await))
        }
        Command::List => data(&ScriptRepo::list_all(pool).await?),
        Command::Show { id } => match ScriptRepo::find_by_id(pool, id).await? {
            Some(script) => data(&script),
            None => Ok(Reply::not_found()),
        },
        Command::Add {
            name,
            file,
            params,
            tags,
            description,
        } => {
            let dto = CreateScript {
                name,
                tags,
                description,
                params,
                code: read_source(&file).await?,
            };
            if let Err(err) = dto.validate() {
                return Ok(Reply::error(err.to_string()));
            }
            let script = ScriptRepo::create(pool, &dto).await?;
            tracing::info!(script_id = script.id, name = %script.name, "Script added");
            data(&script)
        }
        Command::Update {
            id,
            name,
            file,
            params,
            tags,
            description,
        } => {
            let dto = UpdateScript {
                name,
                tags,
                description,
                params,
                code: read_source(&file).await?,
            };
            if let Err(err) = dto.validate() {
                return Ok(Reply::error(err.to_string()));
            }
            match ScriptRepo::update(pool, id, &dto).await? {
                Some(script) => {
                    tracing::info!(script_id = id, "Script updated");
                    data(&script)
                }
                None => Ok(Reply::not_found()),
            }
        }
        Command::Delete { id } => {
            if !ScriptRepo::delete(pool, id).await? {
                return Ok(Reply::not_found());
            }
            tracing::info!(script_id = id, "Script deleted");
            Ok(Reply::data(serde_json::json!({ "success": true })))
        }
        Command::Reorder { ids } => {
            if !ScriptRepo::reorder(pool, &ids).await? {
                return Ok(Reply::error(REORDER_REJECTED));
            }
            Ok(Reply::data(serde_json::json!({ "success": true })))
        }
        Command::Settings => data(&SettingRepo::list_all(pool).await?),
        Command::SetSetting {
            key,
            value,
            description,
        } => {
            let dto = UpsertSetting {
                key,
                value,
                description,
            };
            if let Err(err) = dto.validate() {
                return Ok(Reply::error(err.to_string()));
            }
            let setting = SettingRepo::upsert(pool, &dto).await?;
            tracing::info!(key = %setting.key, "Setting saved");
            data(&setting)
        }
    }
}

fn data<T: Serialize>(value: &T) -> anyhow::Result<Reply> {
    Ok(Reply::data(serde_json::to_value(value)?))
}

async fn read_source(file: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))
}
