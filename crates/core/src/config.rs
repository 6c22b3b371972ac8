use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock limit for one script run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default interpreter used to run stored scripts.
pub const DEFAULT_PYTHON_BIN: &str = "python3";

/// Execution engine configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Wall-clock limit before the child process is killed (default: 30s).
    pub timeout: Duration,
    /// Interpreter program, resolved through `PATH` (default: `python3`).
    pub interpreter: String,
    /// Directory where transient script files are created (default: OS temp dir).
    pub temp_dir: PathBuf,
    /// Working directory for the child process (uses current dir if `None`).
    pub working_directory: Option<PathBuf>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            interpreter: DEFAULT_PYTHON_BIN.to_string(),
            temp_dir: std::env::temp_dir(),
            working_directory: None,
        }
    }
}

impl ExecutorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default         |
    /// |-----------------------|-----------------|
    /// | `SCRIPT_TIMEOUT_SECS` | `30`            |
    /// | `PYTHON_BIN`          | `python3`       |
    /// | `SCRIPT_TEMP_DIR`     | OS temp dir     |
    /// | `SCRIPT_WORKING_DIR`  | current dir     |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset. A timeout that is not a positive integer
    /// is logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs = match get("SCRIPT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_TIMEOUT_SECS,
                        "Invalid SCRIPT_TIMEOUT_SECS, using default"
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            timeout: Duration::from_secs(timeout_secs),
            interpreter: get("PYTHON_BIN").unwrap_or(defaults.interpreter),
            temp_dir: get("SCRIPT_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.temp_dir),
            working_directory: get("SCRIPT_WORKING_DIR").map(PathBuf::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
