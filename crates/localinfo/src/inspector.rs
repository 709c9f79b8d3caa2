use localinfo_exec::{CommandGateway, ExecOptions, GitCli, GitCommand};
use std::path::Path;
use tracing::debug;

use crate::parser::{
    count_stashes, is_blank, parse_bool_flag, parse_branch_list, parse_commit_time,
    parse_first_commit,
};
use crate::policy::{settle, Settled};
use crate::{
    commands, parse_remote_list, parse_sync_status, select_remote, ChangeCounts, FetchState,
    LocalInfoConfig, Operation, ParseError, QueryError, RepositoryIdentity,
};

/// Answers questions about a local git working copy.
///
/// Every method is a single round of one or two gateway calls; nothing is
/// cached between calls.
pub struct LocalInfo<G = GitCli> {
    gateway: G,
    config: LocalInfoConfig,
}

impl LocalInfo<GitCli> {
    pub fn new() -> Self {
        Self::from_config(LocalInfoConfig::default())
    }

    pub fn from_config(config: LocalInfoConfig) -> Self {
        Self {
            gateway: GitCli::with_binary_path(config.git_binary.clone()),
            config,
        }
    }
}

impl Default for LocalInfo<GitCli> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: CommandGateway> LocalInfo<G> {
    pub fn with_gateway(gateway: G) -> Self {
        Self::with_gateway_and_config(gateway, LocalInfoConfig::default())
    }

    pub fn with_gateway_and_config(gateway: G, config: LocalInfoConfig) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &LocalInfoConfig {
        &self.config
    }

    /// `owner/repo` of the preferred remote (`origin` by default), or of the
    /// first remote when there is none by that name. `None` without remotes.
    pub async fn github_name(&self, dir: &Path) -> Result<Option<RepositoryIdentity>, QueryError> {
        let preferred = self.config.preferred_remote.as_str();
        self.query(Operation::GithubName, dir, commands::remote_list(), |raw| {
            let remotes = parse_remote_list(raw)?;
            select_remote(&remotes, preferred)
                .map(|remote| RepositoryIdentity::from_remote_url(&remote.url))
                .transpose()
        })
        .await
    }

    /// [`github_name`](Self::github_name) for the process's current directory
    pub async fn github_name_here(&self) -> Result<Option<RepositoryIdentity>, QueryError> {
        self.github_name(Path::new(".")).await
    }

    /// Short hash of the oldest root commit
    pub async fn first_commit(&self, dir: &Path) -> Result<String, QueryError> {
        self.query(
            Operation::FirstCommit,
            dir,
            commands::first_commit(),
            parse_first_commit,
        )
        .await
    }

    /// Committer timestamp of `reference` in strict ISO-8601
    pub async fn commit_time(&self, dir: &Path, reference: &str) -> Result<String, QueryError> {
        self.query(
            Operation::CommitTime,
            dir,
            commands::commit_time(reference),
            parse_commit_time,
        )
        .await
    }

    pub async fn ensure_clean(&self, dir: &Path) -> Result<bool, QueryError> {
        self.query(
            Operation::EnsureClean,
            dir,
            commands::porcelain_status(),
            |raw| Ok(is_blank(raw)),
        )
        .await
    }

    /// Fetch, then compare the current branch with its upstream.
    ///
    /// The comparison only runs once the fetch has succeeded. Failures of
    /// either step are reported as `git fetch <dir>: ...`, and a fetch that
    /// outlives `fetch_timeout` reports [`QueryError::killed`].
    pub async fn ensure_fetched(&self, dir: &Path) -> Result<FetchState, QueryError> {
        let operation = Operation::EnsureFetched;
        let options = self.options(dir).with_timeout(self.config.fetch_timeout);

        let fetched = self.gateway.execute(&commands::fetch(), &options).await;
        settle(operation, dir, fetched)?;

        let status = self
            .query(operation, dir, commands::upstream_status(), parse_sync_status)
            .await?;

        debug!(
            dir = %dir.display(),
            behind = ?status.behind,
            ahead = ?status.ahead,
            "Compared with upstream"
        );

        Ok(FetchState::from(status))
    }

    pub async fn status(&self, dir: &Path) -> Result<ChangeCounts, QueryError> {
        let counts = self
            .query(
                Operation::Status,
                dir,
                commands::porcelain_status(),
                ChangeCounts::from_porcelain,
            )
            .await?;

        debug!(
            dir = %dir.display(),
            added = counts.added,
            modified = counts.modified,
            deleted = counts.deleted,
            untracked = counts.untracked,
            "Classified working tree"
        );

        Ok(counts)
    }

    /// Local branches not merged into the current one.
    ///
    /// A repository without commits has nothing to compare against and
    /// yields an empty list rather than an error.
    pub async fn unmerged_branches(&self, dir: &Path) -> Result<Vec<String>, QueryError> {
        self.query(
            Operation::UnmergedBranches,
            dir,
            commands::unmerged_branches(),
            |raw| Ok(parse_branch_list(raw)),
        )
        .await
    }

    pub async fn stashes(&self, dir: &Path) -> Result<usize, QueryError> {
        self.query(Operation::Stashes, dir, commands::stash_list(), |raw| {
            Ok(count_stashes(raw))
        })
        .await
    }

    /// Whether `path` is mounted inside another repository's work tree.
    ///
    /// Asks git whether the parent directory is inside a work tree, so any
    /// directory nested in a repository answers `true`, not only gitlinks.
    /// Never fails: any error, including a path without a parent, answers
    /// `false`.
    pub async fn is_submodule(&self, path: &Path) -> bool {
        let parent = match path.parent() {
            Some(p) if p.as_os_str().is_empty() => Path::new("."),
            Some(p) => p,
            None => {
                debug!(path = %path.display(), "No parent directory");
                return false;
            }
        };

        self.query(
            Operation::IsSubmodule,
            parent,
            commands::inside_work_tree(),
            |raw| Ok(parse_bool_flag(raw)),
        )
        .await
        .unwrap_or(false)
    }

    fn options(&self, dir: &Path) -> ExecOptions {
        ExecOptions::new(dir).with_optional_timeout(self.config.command_timeout)
    }

    /// Run `command` in `dir`, settle the result under `operation`'s policy
    /// and parse the output. Recovered failures yield `T::default()`.
    async fn query<T, F>(
        &self,
        operation: Operation,
        dir: &Path,
        command: GitCommand,
        parse: F,
    ) -> Result<T, QueryError>
    where
        T: Default,
        F: FnOnce(&str) -> Result<T, ParseError>,
    {
        let result = self.gateway.execute(&command, &self.options(dir)).await;

        match settle(operation, dir, result)? {
            Settled::Output(output) => {
                parse(&output).map_err(|source| QueryError::Parse { operation, source })
            }
            Settled::Recovered => Ok(T::default()),
        }
    }
}
