//! `appdeck-runner` -- command-line front end for stored scripts.
//!
//! Opens the SQLite database, applies migrations, and dispatches one
//! subcommand. Results are printed to stdout as JSON; logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable              | Default            | Description                        |
//! |-----------------------|--------------------|------------------------------------|
//! | `DATABASE_URL`        | `sqlite://apps.db` | SQLite database location           |
//! | `SCRIPT_TIMEOUT_SECS` | `30`               | Wall-clock limit per script run    |
//! | `PYTHON_BIN`          | `python3`          | Interpreter used to run scripts    |
//! | `SCRIPT_TEMP_DIR`     | OS temp dir        | Where transient script files go    |
//! | `SCRIPT_WORKING_DIR`  | current dir        | Working directory of the child     |

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appdeck_db::models::setting::{UpsertSetting, SQLITE_PATH_KEY};
use appdeck_db::repositories::SettingRepo;
use appdeck_db::DbPool;
use appdeck_runner::cli::Cli;
use appdeck_runner::commands;
use appdeck_runner::config::RunnerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "appdeck_runner=info,appdeck_core=info,appdeck_db=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = RunnerConfig::from_env();

    tracing::info!(
        database_url = %config.database_url,
        timeout_secs = config.executor.timeout.as_secs(),
        interpreter = %config.executor.interpreter,
        "Starting appdeck-runner",
    );

    let pool = appdeck_db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    appdeck_db::health_check(&pool)
        .await
        .context("database health check failed")?;
    appdeck_db::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;
    seed_settings(&pool, &config).await?;

    let reply = commands::dispatch(cli.command, &pool, &config.executor).await?;
    print_json(&reply.body)?;
    pool.close().await;
    std::process::exit(reply.exit_code());
}

/// Record the database location on first start.
async fn seed_settings(pool: &DbPool, config: &RunnerConfig) -> anyhow::Result<()> {
    let inserted = SettingRepo::insert_default(
        pool,
        &UpsertSetting {
            key: SQLITE_PATH_KEY.to_string(),
            value: config.database_path().to_string(),
            description: Some("SQLite数据库文件路径".to_string()),
        },
    )
    .await
    .context("failed to seed system settings")?;
    if inserted {
        tracing::info!(path = config.database_path(), "Seeded database path setting");
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
