//! Script execution engine.
//!
//! Turns a stored script plus its stored parameters into one isolated
//! interpreter run: inject parameters, write a transient file, spawn the
//! interpreter under a timeout, collect output, delete the file, report.
//! All subprocess management is pure (no DB access) and lives in the `core`
//! crate for isolation and testability.

pub mod executor;
pub mod orchestrator;
pub mod params;
pub mod python;
pub mod report;
pub mod subprocess;
pub mod transient;

/// Shared test helpers for executor tests.
#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::config::DEFAULT_PYTHON_BIN;

    /// `true` when the default Python interpreter is on `PATH`.
    ///
    /// Tests that need a real interpreter return early when this is `false`.
    pub fn python_available() -> bool {
        std::process::Command::new(DEFAULT_PYTHON_BIN)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}
