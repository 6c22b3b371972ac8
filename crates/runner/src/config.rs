use appdeck_core::config::ExecutorConfig;

/// Database used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://apps.db";

/// Runner configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// SQLite connection URL (default: `sqlite://apps.db`).
    pub database_url: String,
    /// Settings forwarded to the script executor.
    pub executor: ExecutorConfig,
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    ///
    /// Call after `dotenvy::dotenv()` so values from `.env` are visible.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Self {
            database_url,
            executor: ExecutorConfig::from_lookup(&lookup),
        }
    }

    /// Filesystem path of the database, as recorded in the settings table.
    ///
    /// Strips the `sqlite:` scheme and any `//` authority marker plus query
    /// string. In-memory URLs are returned unchanged.
    pub fn database_path(&self) -> &str {
        let rest = self
            .database_url
            .strip_prefix("sqlite:")
            .unwrap_or(&self.database_url);
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        rest.split('?').next().unwrap_or(rest)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
