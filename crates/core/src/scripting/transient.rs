//! Single-use script files.
//!
//! A [`TransientUnit`] owns one uniquely named `.py` file for the duration
//! of one run. The file is removed by [`TransientUnit::cleanup`] or, on any
//! other exit path (early return, panic, dropped future), by `Drop`.

use std::io;
use std::path::Path;

use tempfile::TempPath;

/// Prefix for transient script file names.
const FILE_PREFIX: &str = "appdeck-";

/// Extension marking the file as interpreter source.
const FILE_SUFFIX: &str = ".py";

/// A temporary script file that is deleted when released.
#[derive(Debug)]
pub struct TransientUnit {
    path: Option<TempPath>,
}

impl TransientUnit {
    /// Create a fresh file in `dir` and write `source` into it.
    ///
    /// The name is random and the file is created exclusively, so
    /// concurrent runs never share a location. If writing fails the
    /// half-created file is removed before the error is returned.
    pub async fn materialize(dir: &Path, source: &str) -> io::Result<Self> {
        let path = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(FILE_SUFFIX)
            .tempfile_in(dir)?
            .into_temp_path();
        let unit = Self { path: Some(path) };

        tokio::fs::write(unit.path(), source).await?;

        tracing::debug!(path = %unit.path().display(), "Transient script created");
        Ok(unit)
    }

    /// Location of the file on disk.
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    /// Delete the file now. Failures are logged, never returned.
    pub fn cleanup(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        let shown = path.display().to_string();

        match path.close() {
            Ok(()) => tracing::debug!(path = %shown, "Transient script removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %shown, "Transient script already gone");
            }
            Err(e) => {
                tracing::warn!(path = %shown, error = %e, "Failed to remove transient script");
            }
        }
    }
}

impl Drop for TransientUnit {
    fn drop(&mut self) {
        self.release();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn materialize_writes_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let unit = TransientUnit::materialize(dir.path(), "print('hi')\n")
            .await
            .expect("materialize");

        let name = unit
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name");
        assert!(name.starts_with(FILE_PREFIX));
        assert!(name.ends_with(FILE_SUFFIX));
        assert_eq!(
            std::fs::read_to_string(unit.path()).expect("read back"),
            "print('hi')\n"
        );
    }

    #[tokio::test]
    async fn cleanup_removes_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let unit = TransientUnit::materialize(dir.path(), "x = 1\n")
            .await
            .expect("materialize");
        let path = unit.path().to_path_buf();

        unit.cleanup();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn drop_removes_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = {
            let unit = TransientUnit::materialize(dir.path(), "x = 1\n")
                .await
                .expect("materialize");
            unit.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn cleanup_tolerates_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let unit = TransientUnit::materialize(dir.path(), "x = 1\n")
            .await
            .expect("materialize");
        std::fs::remove_file(unit.path()).expect("remove early");

        unit.cleanup();
    }

    #[tokio::test]
    async fn concurrent_units_get_distinct_paths() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (a, b) = tokio::join!(
            TransientUnit::materialize(dir.path(), "a = 1\n"),
            TransientUnit::materialize(dir.path(), "b = 2\n"),
        );
        let (a, b) = (a.expect("first"), b.expect("second"));
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("does-not-exist");
        assert!(TransientUnit::materialize(&missing, "x = 1\n").await.is_err());
    }
}
