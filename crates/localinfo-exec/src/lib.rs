//! # localinfo-exec
//!
//! The command gateway used by the localinfo query layer.
//!
//! Every repository query is answered by running the `git` executable
//! against a working directory and reading its stdout. This crate owns that
//! boundary: it turns a [`GitCommand`] plus [`ExecOptions`] into either the
//! raw stdout text or an [`ExecError`].
//!
//! ## Key Types
//!
//! - [`CommandGateway`] - The async seam the query layer is written against
//! - [`GitCli`] - Default gateway that spawns `git` with `tokio::process`
//! - [`ExecError`] - Failure of a command, including timeout kills
//!
//! ## Timeouts
//!
//! When [`ExecOptions::timeout`] is set and expires, the child process is
//! killed and the call fails with [`ExecError::TimedOut`]. Callers check
//! [`ExecError::killed`] to tell a stalled command from one that exited with
//! an error.

mod command;
mod spawner;
mod traits;

pub use command::GitCommand;
pub use spawner::GitCli;
pub use traits::{CommandGateway, ExecError, ExecOptions};
