use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::GitCommand;

/// Errors that can occur while running a git command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("Failed to spawn `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    #[error("`{command}` was killed after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    #[error("{message}")]
    Failed {
        command: String,
        exit_code: Option<i32>,
        message: String,
    },
}

impl ExecError {
    /// A command that ran and reported failure.
    pub fn failed(command: &GitCommand, exit_code: Option<i32>, message: impl Into<String>) -> Self {
        ExecError::Failed {
            command: command.to_string(),
            exit_code,
            message: message.into(),
        }
    }

    pub fn timed_out(command: &GitCommand, timeout: Duration) -> Self {
        ExecError::TimedOut {
            command: command.to_string(),
            timeout,
        }
    }

    /// Whether the process was terminated because its timeout fired
    pub fn killed(&self) -> bool {
        matches!(self, ExecError::TimedOut { .. })
    }

    pub fn command(&self) -> &str {
        match self {
            ExecError::SpawnFailed { command, .. }
            | ExecError::TimedOut { command, .. }
            | ExecError::Failed { command, .. } => command,
        }
    }
}

/// Options for a single gateway invocation
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// Directory the command runs in
    pub working_dir: PathBuf,
    /// Optional timeout (None = no limit)
    pub timeout: Option<Duration>,
    /// Additional environment variables
    pub env_vars: HashMap<String, String>,
}

impl ExecOptions {
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            timeout: None,
            env_vars: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Applies `timeout` only when one is given
    pub fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        if timeout.is_some() {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }
}

/// Runs git commands and yields their stdout.
///
/// Implementations resolve exactly once per call: either the captured stdout
/// of a successful command or the [`ExecError`] describing why it failed.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    async fn execute(&self, command: &GitCommand, options: &ExecOptions)
        -> Result<String, ExecError>;
}

#[async_trait]
impl<T: CommandGateway + ?Sized> CommandGateway for Arc<T> {
    async fn execute(
        &self,
        command: &GitCommand,
        options: &ExecOptions,
    ) -> Result<String, ExecError> {
        (**self).execute(command, options).await
    }
}
