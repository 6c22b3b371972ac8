//! Subprocess management for script runs.
//!
//! Provides [`run_command`]: spawn a prepared [`tokio::process::Command`]
//! with a controlled environment, capture stdout/stderr, and enforce the
//! configured timeout.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ExecutorError, ProcessOutput, ScriptInput};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Output past this limit is read and discarded so the child never blocks
/// on a full pipe.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Base environment every child receives. The parent environment is not
/// inherited; `PATH` is copied separately so the interpreter resolves.
const BASE_ENV: &[(&str, &str)] = &[("PYTHONPATH", "."), ("PYTHONIOENCODING", "utf-8")];

/// Spawn `cmd` as a child process, capture stdout/stderr, and enforce the
/// configured timeout.
///
/// The caller sets the program and arguments. Environment and working
/// directory come from [`ScriptInput`]. On timeout the child is killed and
/// reaped before [`ExecutorError::Timeout`] is returned.
pub async fn run_command(
    cmd: &mut Command,
    input: &ScriptInput,
) -> Result<ProcessOutput, ExecutorError> {
    // `kill_on_drop(true)` covers callers that drop the future mid-wait.
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    cmd.env_clear();
    if let Some(path) = std::env::var_os("PATH") {
        cmd.env("PATH", path);
    }
    for (key, value) in BASE_ENV {
        cmd.env(key, value);
    }
    for (key, value) in &input.env_vars {
        cmd.env(key, value);
    }

    if let Some(dir) = &input.working_directory {
        cmd.current_dir(dir);
    }

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|source| ExecutorError::Spawn {
        program: program.clone(),
        source,
    })?;

    // Read stdout/stderr in spawned tasks so `child.wait()` can borrow
    // `&mut child` at the same time.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let mut stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let mut stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    // The deadline covers collecting output as well as the exit. A
    // background process that inherited the pipes keeps them open after
    // the interpreter itself has exited.
    let collected = tokio::time::timeout(input.timeout, async {
        let status = child.wait().await?;
        let stdout_bytes = (&mut stdout_task).await.unwrap_or_default();
        let stderr_bytes = (&mut stderr_task).await.unwrap_or_default();
        Ok::<_, std::io::Error>((status, stdout_bytes, stderr_bytes))
    })
    .await;

    match collected {
        Ok(Ok((status, stdout_bytes, stderr_bytes))) => Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
            exit_code: status.code().unwrap_or(-1),
            duration_ms: start.elapsed().as_millis() as u64,
        }),
        Ok(Err(e)) => {
            stdout_task.abort();
            stderr_task.abort();
            Err(ExecutorError::Wait(e))
        }
        Err(_elapsed) => {
            // `kill()` sends SIGKILL and waits for the exit, so the process
            // is gone by the time we report. It may already have exited if
            // only the output streams were still open.
            if !matches!(child.try_wait(), Ok(Some(_))) {
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "Failed to kill timed-out script process");
                }
            }
            stdout_task.abort();
            stderr_task.abort();
            tracing::warn!(
                program = %program,
                timeout_ms = input.timeout.as_millis() as u64,
                "Script process timed out"
            );
            Err(ExecutorError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

/// Read an entire output stream, keeping at most [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
        let _ = tokio::io::copy(&mut h, &mut tokio::io::sink()).await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
