use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::{CommandGateway, ExecError, ExecOptions, GitCommand};

/// Gateway that runs the `git` executable as a child process
#[derive(Debug, Clone)]
pub struct GitCli {
    binary_path: PathBuf,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from("git"),
        }
    }

    pub fn with_binary_path(path: PathBuf) -> Self {
        Self { binary_path: path }
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn build(&self, command: &GitCommand, options: &ExecOptions) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(command.args())
            .current_dir(&options.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null()) // Non-interactive
            .kill_on_drop(true)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C");

        for (key, value) in &options.env_vars {
            cmd.env(key, value);
        }

        cmd
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandGateway for GitCli {
    async fn execute(
        &self,
        command: &GitCommand,
        options: &ExecOptions,
    ) -> Result<String, ExecError> {
        let start = Instant::now();

        debug!(
            command = %command,
            working_dir = %options.working_dir.display(),
            timeout = ?options.timeout,
            "Spawning git process"
        );

        let child = self
            .build(command, options)
            .spawn()
            .map_err(|e| ExecError::SpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let waited = match options.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        command = %command,
                        timeout_ms = limit.as_millis(),
                        "Git process killed after timeout"
                    );
                    return Err(ExecError::timed_out(command, limit));
                }
            },
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|e| ExecError::SpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let exit_code = output.status.code();
        debug!(
            command = %command,
            exit_code = exit_code.unwrap_or(-1),
            duration_ms = start.elapsed().as_millis(),
            "Git process completed"
        );

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            trace!(stderr = %stderr.trim_end(), "stderr");
        }

        if !output.status.success() {
            let message = match stderr.trim() {
                "" => format!(
                    "`{}` exited with status {}",
                    command,
                    exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string())
                ),
                text => text.to_string(),
            };
            return Err(ExecError::failed(command, exit_code, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_execute_version() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::new();

        let out = git
            .execute(&GitCommand::new(["--version"]), &ExecOptions::new(temp.path()))
            .await
            .unwrap();

        assert!(out.starts_with("git version"));
    }

    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::new();

        // A bare temp dir is not a repository
        let err = git
            .execute(
                &GitCommand::new(["rev-parse", "--show-toplevel"]),
                &ExecOptions::new(temp.path()),
            )
            .await
            .unwrap_err();

        assert!(!err.killed());
        assert_eq!(err.command(), "git rev-parse --show-toplevel");
        assert!(err.to_string().contains("not a git repository"));
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::with_binary_path(PathBuf::from("/nonexistent/bin/git"));

        let err = git
            .execute(&GitCommand::new(["status"]), &ExecOptions::new(temp.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, ExecError::SpawnFailed { .. }));
        assert!(!err.killed());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_process() {
        let temp = TempDir::new().unwrap();
        let slow = GitCli::with_binary_path(PathBuf::from("sleep"));
        let opts = ExecOptions::new(temp.path()).with_timeout(Duration::from_millis(100));

        let start = Instant::now();
        let err = slow
            .execute(&GitCommand::new(["5"]), &opts)
            .await
            .unwrap_err();

        assert!(err.killed());
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
