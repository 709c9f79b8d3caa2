use localinfo_exec::ExecError;
use std::path::PathBuf;
use thiserror::Error;

use crate::Operation;

/// Errors raised while turning git output into values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Command produced no output")]
    EmptyOutput,

    #[error("Malformed remote line: {0:?}")]
    MalformedRemoteLine(String),

    #[error("Unrecognized remote URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("Invalid divergence marker: {0:?}")]
    InvalidDivergence(String),

    #[error("Invalid commit timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Errors reported by the query operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Gateway failure passed through unchanged
    #[error(transparent)]
    Command(ExecError),

    /// Gateway failure prefixed with the operation and directory
    #[error("git {verb} {path}: {source}", path = .dir.display())]
    Scoped {
        verb: &'static str,
        dir: PathBuf,
        #[source]
        source: ExecError,
    },

    #[error("Failed to parse {operation} output: {source}")]
    Parse {
        operation: Operation,
        #[source]
        source: ParseError,
    },
}

impl QueryError {
    /// Whether the underlying command was killed by its timeout
    pub fn killed(&self) -> bool {
        match self {
            QueryError::Command(e) | QueryError::Scoped { source: e, .. } => e.killed(),
            QueryError::Parse { .. } => false,
        }
    }

    /// The gateway error behind this failure, if any
    pub fn exec_error(&self) -> Option<&ExecError> {
        match self {
            QueryError::Command(e) | QueryError::Scoped { source: e, .. } => Some(e),
            QueryError::Parse { .. } => None,
        }
    }
}
