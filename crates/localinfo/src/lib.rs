//! # localinfo
//!
//! Facts about a local git working copy for release and build automation.
//!
//! Each query runs the `git` command line through a
//! [`CommandGateway`](localinfo_exec::CommandGateway), parses the textual
//! output and normalizes failures into [`QueryError`].
//!
//! ## Key Types
//!
//! - [`LocalInfo`] - The query operations
//! - [`RepositoryIdentity`] - `owner/repo` derived from a remote URL
//! - [`ChangeCounts`] - Changed paths per category
//! - [`FetchState`] / [`SyncStatus`] - Divergence from upstream after a fetch
//! - [`Operation`] - Error policy table shared by the operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use localinfo::LocalInfo;
//! use std::path::Path;
//!
//! let info = LocalInfo::new();
//! let dir = Path::new(".");
//!
//! if !info.ensure_clean(dir).await? {
//!     let counts = info.status(dir).await?;
//!     println!("{} paths changed", counts.total());
//! }
//!
//! let state = info.ensure_fetched(dir).await?;
//! if !state.fetched {
//!     println!("behind upstream by {:?}", state.status.behind);
//! }
//! ```
//!
//! ## Errors
//!
//! Failures of `status`, `stashes` and `ensure_fetched` read
//! `git <verb> <dir>: <message>`; the other operations pass the gateway's
//! message through. `unmerged_branches` in a repository without commits
//! returns an empty list, and `is_submodule` answers `false` on any failure.

mod commands;
mod config;
mod error;
mod inspector;
mod parser;
pub mod policy;
mod remote;
mod status;
mod sync;

pub use config::{LocalInfoConfig, CONFIG_FILE_NAME, DEFAULT_FETCH_TIMEOUT};
pub use error::{ParseError, QueryError};
pub use inspector::LocalInfo;
pub use parser::{
    count_stashes, is_blank, parse_bool_flag, parse_branch_list, parse_commit_time,
    parse_first_commit,
};
pub use policy::{ErrorPolicy, Operation, Recovery, Wrap};
pub use remote::{parse_remote_list, select_remote, RemoteDirection, RemoteEntry, RepositoryIdentity};
pub use status::{classify, ChangeCounts, ChangeKind};
pub use sync::{parse_sync_status, FetchState, SyncStatus};

pub use localinfo_exec::{CommandGateway, ExecError, ExecOptions, GitCli, GitCommand};
