//! Per-operation error handling.
//!
//! Operations differ in how gateway failures reach the caller: some pass
//! them through, some prefix them with `git <verb> <dir>:`, and two treat
//! certain failures as an empty result. All of that lives in
//! [`Operation::policy`] so the differences stay in one table.

use localinfo_exec::ExecError;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::QueryError;

/// Message git prints when `HEAD` does not resolve because nothing is committed yet
pub const EMPTY_HISTORY_MARKER: &str = "malformed object name HEAD";

/// The query operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GithubName,
    FirstCommit,
    CommitTime,
    EnsureClean,
    EnsureFetched,
    Status,
    UnmergedBranches,
    Stashes,
    IsSubmodule,
}

/// How a failure is presented to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Surface the gateway error unchanged
    Passthrough,
    /// Render as `git <verb> <dir>: <message>`
    Scoped(&'static str),
}

/// Failures that resolve to the operation's empty value instead of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    None,
    /// The repository has no commits yet
    EmptyHistory,
    /// Any failure at all
    AnyFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub wrap: Wrap,
    pub recovery: Recovery,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::GithubName,
        Operation::FirstCommit,
        Operation::CommitTime,
        Operation::EnsureClean,
        Operation::EnsureFetched,
        Operation::Status,
        Operation::UnmergedBranches,
        Operation::Stashes,
        Operation::IsSubmodule,
    ];

    pub const fn policy(self) -> ErrorPolicy {
        let (wrap, recovery) = match self {
            Operation::GithubName => (Wrap::Passthrough, Recovery::None),
            Operation::FirstCommit => (Wrap::Passthrough, Recovery::None),
            Operation::CommitTime => (Wrap::Passthrough, Recovery::None),
            Operation::EnsureClean => (Wrap::Passthrough, Recovery::None),
            Operation::EnsureFetched => (Wrap::Scoped("fetch"), Recovery::None),
            Operation::Status => (Wrap::Scoped("status"), Recovery::None),
            Operation::UnmergedBranches => (Wrap::Passthrough, Recovery::EmptyHistory),
            Operation::Stashes => (Wrap::Scoped("stash"), Recovery::None),
            Operation::IsSubmodule => (Wrap::Passthrough, Recovery::AnyFailure),
        };
        ErrorPolicy { wrap, recovery }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::GithubName => "github_name",
            Operation::FirstCommit => "first_commit",
            Operation::CommitTime => "commit_time",
            Operation::EnsureClean => "ensure_clean",
            Operation::EnsureFetched => "ensure_fetched",
            Operation::Status => "status",
            Operation::UnmergedBranches => "unmerged_branches",
            Operation::Stashes => "stashes",
            Operation::IsSubmodule => "is_submodule",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Recovery {
    pub fn recovers(self, err: &ExecError) -> bool {
        match self {
            Recovery::None => false,
            Recovery::EmptyHistory => err.to_string().contains(EMPTY_HISTORY_MARKER),
            Recovery::AnyFailure => true,
        }
    }
}

impl ErrorPolicy {
    pub fn wrap(self, dir: &Path, err: ExecError) -> QueryError {
        match self.wrap {
            Wrap::Passthrough => QueryError::Command(err),
            Wrap::Scoped(verb) => QueryError::Scoped {
                verb,
                dir: dir.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Outcome of a gateway call after the policy has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Output(String),
    Recovered,
}

/// Apply `operation`'s policy to a raw gateway result.
pub fn settle(
    operation: Operation,
    dir: &Path,
    result: Result<String, ExecError>,
) -> Result<Settled, QueryError> {
    let err = match result {
        Ok(output) => return Ok(Settled::Output(output)),
        Err(err) => err,
    };

    let policy = operation.policy();
    if policy.recovery.recovers(&err) {
        debug!(
            operation = %operation,
            dir = %dir.display(),
            error = %err,
            "Treating failure as empty result"
        );
        return Ok(Settled::Recovered);
    }

    Err(policy.wrap(dir, err))
}
