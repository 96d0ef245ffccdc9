//! Child-process execution of HDFS client commands.
//!
//! Every way a command can go wrong is folded into [`CommandError`] here, so
//! tool handlers only ever see a value, never a panic or a raw I/O error.

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;

/// Default wall-clock budget for one command, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Output of a command that exited with status zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Trimmed standard output.
    pub stdout: String,
    /// Trimmed standard error, if any. Informational only on success.
    pub stderr: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    NonZeroExit,
    Timeout,
    ExecutableNotFound,
    Other,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Rejected before any process was started.
    #[error("{0}")]
    Validation(String),

    #[error("Command failed with exit code {code}:\n{detail}")]
    NonZeroExit { code: i32, detail: String },

    #[error("Command timed out after {} seconds. Consider increasing timeout.", format_secs(.timeout))]
    Timeout { timeout: Duration },

    #[error("HDFS command not found. Ensure Hadoop client is installed and '{client}' is in your PATH.")]
    ExecutableNotFound { client: String },

    #[error("An unexpected error occurred: {0}")]
    Other(String),
}

impl CommandError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::Validation(_) => ErrorKind::ValidationFailed,
            CommandError::NonZeroExit { .. } => ErrorKind::NonZeroExit,
            CommandError::Timeout { .. } => ErrorKind::Timeout,
            CommandError::ExecutableNotFound { .. } => ErrorKind::ExecutableNotFound,
            CommandError::Other(_) => ErrorKind::Other,
        }
    }
}

pub type ExecutionResult = Result<CommandOutput, CommandError>;

fn format_secs(timeout: &Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        timeout.as_secs().to_string()
    } else {
        format!("{:.1}", timeout.as_secs_f64())
    }
}

/// Exit code, or the negated signal number for a child killed by a signal.
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

/// Runs argument vectors as child processes under a time budget.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl CommandExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `argv[0]` with the remaining arguments and classify the outcome.
    pub async fn execute(&self, argv: &[String]) -> ExecutionResult {
        let Some((program, args)) = argv.split_first() else {
            return Err(CommandError::Other("No HDFS subcommand provided.".to_string()));
        };

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(client = %program, "HDFS client executable not found");
                return Err(CommandError::ExecutableNotFound {
                    client: program.clone(),
                });
            }
            Err(e) => {
                tracing::error!(client = %program, error = %e, "Failed to spawn HDFS client");
                return Err(CommandError::Other(e.to_string()));
            }
        };

        // On timeout the child is dropped with the future; kill_on_drop reaps it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to collect HDFS client output");
                return Err(CommandError::Other(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "HDFS command timed out");
                return Err(CommandError::Timeout {
                    timeout: self.timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            tracing::debug!(stdout_bytes = stdout.len(), "HDFS command succeeded");
            return Ok(CommandOutput {
                stdout,
                stderr: (!stderr.is_empty()).then_some(stderr),
            });
        }

        let code = exit_code(&output.status);
        tracing::warn!(code, stderr = %stderr, "HDFS command failed");
        let detail = if stderr.is_empty() {
            format!(
                "Command '{}' returned non-zero exit status {}.",
                argv.join(" "),
                code
            )
        } else {
            stderr
        };
        Err(CommandError::NonZeroExit { code, detail })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_success_trims_output() {
        let executor = CommandExecutor::default();
        let output = executor
            .execute(&argv(&["sh", "-c", "echo '  found 2 items  '"]))
            .await
            .unwrap();
        assert_eq!(output.stdout, "found 2 items");
        assert_eq!(output.stderr, None);
    }

    #[tokio::test]
    async fn test_success_with_empty_output() {
        let executor = CommandExecutor::default();
        let output = executor.execute(&argv(&["true"])).await.unwrap();
        assert_eq!(output, CommandOutput::default());
    }

    #[tokio::test]
    async fn test_success_keeps_stderr_as_warning() {
        let executor = CommandExecutor::default();
        let output = executor
            .execute(&argv(&["sh", "-c", "echo ok; echo 'WARN native lib' >&2"]))
            .await
            .unwrap();
        assert_eq!(output.stdout, "ok");
        assert_eq!(output.stderr.as_deref(), Some("WARN native lib"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_code_and_stderr() {
        let executor = CommandExecutor::default();
        let err = executor
            .execute(&argv(&["sh", "-c", "echo '  No such file  ' >&2; exit 3"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonZeroExit);
        assert_eq!(err.to_string(), "Command failed with exit code 3:\nNo such file");
    }

    #[tokio::test]
    async fn test_non_zero_exit_without_stderr() {
        let executor = CommandExecutor::default();
        let err = executor.execute(&argv(&["false"])).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Command failed with exit code 1:\n"));
        assert!(message.contains("returned non-zero exit status 1"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let executor = CommandExecutor::new(Duration::from_secs(1));
        let started = std::time::Instant::now();
        let err = executor.execute(&argv(&["sleep", "30"])).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(
            err.to_string(),
            "Command timed out after 1 seconds. Consider increasing timeout."
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("finished");
        let script = format!("sleep 3; touch '{}'", marker.display());

        let executor = CommandExecutor::new(Duration::from_secs(1));
        let err = executor
            .execute(&argv(&["sh", "-c", &script]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);

        // Past the point where a surviving child would have created the marker.
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_signal_reports_negative_code() {
        let executor = CommandExecutor::default();
        let err = executor
            .execute(&argv(&["sh", "-c", "kill -9 $$"]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::NonZeroExit {
                code: -9,
                detail: "Command 'sh -c kill -9 $$' returned non-zero exit status -9.".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let executor = CommandExecutor::default();
        let err = executor
            .execute(&argv(&["definitely_not_an_hdfs_client_xyz", "dfs", "-ls"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExecutableNotFound);
        assert!(err.to_string().contains("definitely_not_an_hdfs_client_xyz"));
        assert!(err.to_string().contains("PATH"));
    }

    #[tokio::test]
    async fn test_permission_denied_is_other() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("not-executable");
        std::fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();

        let executor = CommandExecutor::default();
        let err = executor
            .execute(&[script.display().to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(err.to_string().starts_with("An unexpected error occurred: "));
    }

    #[tokio::test]
    async fn test_empty_argv() {
        let executor = CommandExecutor::default();
        let err = executor.execute(&[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred: No HDFS subcommand provided."
        );
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(&Duration::from_secs(120)), "120");
        assert_eq!(format_secs(&Duration::from_millis(1500)), "1.5");
    }
}
