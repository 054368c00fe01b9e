//! Builder for executing external tool commands with byte stdin/stdout.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use bytes::Bytes;
use clearcast_common::{Error, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Output captured from a successful tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output.
    pub stdout: Bytes,
    /// Captured standard error (lossy UTF-8, trimmed).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// Stdin chunks are written in order from a separate task while output is
/// drained, so a tool that streams output before consuming all of its input
/// cannot deadlock on a full pipe.
///
/// # Example
///
/// ```no_run
/// use clearcast_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> clearcast_common::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffmpeg"))
///     .args(["-loglevel", "error", "-i", "pipe:0", "-c", "copy", "-f", "mpegts", "pipe:1"])
///     .stdin(bytes::Bytes::from_static(b"..."))
///     .execute()
///     .await?;
/// println!("{} bytes", output.stdout.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    stdin_chunks: Vec<Bytes>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: None,
            stdin_chunks: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time. Unlimited when never called.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = Some(d);
        self
    }

    /// Queue a chunk to be written to the process's stdin. Chunks are written
    /// in the order queued, then stdin is closed.
    pub fn stdin(&mut self, data: Bytes) -> &mut Self {
        self.stdin_chunks.push(data);
        self
    }

    /// The argument list as queued.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::Remux`] with the exit code if the process exits unsuccessfully
    ///   (stderr is logged, never returned).
    /// - [`Error::Internal`] if spawning fails or the timeout expires. The
    ///   child is killed when the timeout fires.
    /// - [`Error::Io`] if collecting output fails.
    pub async fn execute(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if self.stdin_chunks.is_empty() {
            cmd.stdin(Stdio::null());
        } else {
            cmd.stdin(Stdio::piped());
        }

        tracing::debug!(tool = %program_name, args = ?self.args, "Spawning tool");
        let mut child = cmd
            .spawn()
            .map_err(|e| Error::internal(format!("failed to spawn {program_name}: {e}")))?;

        let writer = child.stdin.take().map(|mut stdin| {
            let chunks = self.stdin_chunks.clone();
            tokio::spawn(async move {
                for chunk in &chunks {
                    stdin.write_all(chunk).await?;
                }
                stdin.shutdown().await
            })
        });

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| Error::internal(format!("{program_name} timed out after {limit:?}")))??,
            None => child.wait_with_output().await?,
        };

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                // The tool may exit before reading everything; its status decides.
                Ok(Err(e)) => tracing::debug!(tool = %program_name, "stdin closed early: {e}"),
                Err(e) => tracing::warn!(tool = %program_name, "stdin writer failed: {e}"),
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            tracing::error!(
                tool = %program_name,
                status = %output.status,
                stderr = %stderr,
                "Tool exited unsuccessfully"
            );
            return Err(Error::Remux {
                exit_code: output.status.code(),
            });
        }
        if !stderr.is_empty() {
            tracing::error!(tool = %program_name, stderr = %stderr, "Tool reported errors");
        }

        Ok(ToolOutput {
            status: output.status,
            stdout: Bytes::from(output.stdout),
            stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn execute_cat_round_trips_stdin() {
        let output = ToolCommand::new(PathBuf::from("cat"))
            .stdin(Bytes::from_static(b"init"))
            .stdin(Bytes::from_static(b"body"))
            .execute()
            .await
            .unwrap();
        assert!(output.status.success());
        assert_eq!(&output.stdout[..], b"initbody");
    }

    #[tokio::test]
    async fn large_stdin_does_not_deadlock() {
        let chunk = Bytes::from(vec![7u8; 1 << 20]);
        let output = ToolCommand::new(PathBuf::from("cat"))
            .stdin(chunk.clone())
            .stdin(chunk)
            .execute()
            .await
            .unwrap();
        assert_eq!(output.stdout.len(), 2 << 20);
    }

    #[tokio::test]
    async fn non_zero_exit_is_remux_failure() {
        let result = ToolCommand::new(PathBuf::from("sh"))
            .args(["-c", "echo nope >&2; exit 3"])
            .execute()
            .await;
        assert!(matches!(result, Err(Error::Remux { exit_code: Some(3) })));
    }

    #[tokio::test]
    async fn execute_nonexistent_tool() {
        let result = ToolCommand::new(PathBuf::from("nonexistent_tool_xyz_12345"))
            .execute()
            .await;
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[tokio::test]
    async fn timeout_fires() {
        let result = ToolCommand::new(PathBuf::from("sleep"))
            .arg("10")
            .timeout(Duration::from_millis(100))
            .execute()
            .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"), "unexpected error: {err}");
    }
}
