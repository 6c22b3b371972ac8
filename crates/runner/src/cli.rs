use std::path::PathBuf;

use appdeck_core::types::DbId;
use clap::{Parser, Subcommand};

/// Run and manage stored Python scripts.
#[derive(Debug, Parser)]
#[command(name = "appdeck-runner", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run a stored script and print its result as JSON.
    Run { id: DbId },

    /// List stored scripts in position order.
    List,

    /// Store a new script read from a source file.
    Add {
        name: String,
        /// Path to the Python source file.
        file: PathBuf,
        /// JSON object made available to the script as `params`.
        #[arg(long)]
        params: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Print one stored script.
    Show { id: DbId },

    /// Replace a stored script's fields; the code is read from a file.
    Update {
        id: DbId,
        name: String,
        /// Path to the Python source file.
        file: PathBuf,
        /// JSON object made available to the script as `params`.
        #[arg(long)]
        params: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a stored script and close the gap in positions.
    Delete { id: DbId },

    /// Reassign positions; the ids must list every stored script once.
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<DbId>,
    },

    /// List system settings.
    Settings,

    /// Create or replace a system setting.
    SetSetting {
        key: String,
        value: String,
        #[arg(long)]
        description: Option<String>,
    },
}
