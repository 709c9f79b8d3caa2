//! Command lines issued by each operation.

use localinfo_exec::GitCommand;

pub fn remote_list() -> GitCommand {
    GitCommand::new(["remote", "-v"])
}

pub fn first_commit() -> GitCommand {
    GitCommand::new(["log", "--max-parents=0", "--format=%h", "HEAD"])
}

/// `log` rather than `show`, which would print an annotated tag before its commit
pub fn commit_time(reference: &str) -> GitCommand {
    GitCommand::new(["log", "-1", "--format=%cI", "--end-of-options"]).arg(reference)
}

pub fn porcelain_status() -> GitCommand {
    GitCommand::new(["status", "--porcelain"])
}

pub fn fetch() -> GitCommand {
    GitCommand::new(["fetch"])
}

/// Branch header with the `[ahead N, behind M]` marker
pub fn upstream_status() -> GitCommand {
    GitCommand::new(["status", "--porcelain", "--branch", "--untracked-files=no"])
}

pub fn unmerged_branches() -> GitCommand {
    GitCommand::new(["branch", "--no-merged"])
}

pub fn stash_list() -> GitCommand {
    GitCommand::new(["stash", "list"])
}

pub fn inside_work_tree() -> GitCommand {
    GitCommand::new(["rev-parse", "--is-inside-work-tree"])
}
