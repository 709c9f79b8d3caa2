#![allow(dead_code)]

use async_trait::async_trait;
use localinfo::{CommandGateway, ExecError, ExecOptions, GitCommand};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

type Responder = Box<dyn Fn(&GitCommand) -> Result<String, ExecError> + Send + Sync>;

/// A recorded gateway call
#[derive(Debug, Clone)]
pub struct Call {
    pub command: String,
    pub options: ExecOptions,
}

/// In-memory gateway answering every command from a closure
pub struct ScriptedGateway {
    responder: Responder,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&GitCommand) -> Result<String, ExecError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command prints `stdout`
    pub fn output(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::new(move |_| Ok(stdout.clone()))
    }

    /// Every command fails with `message`
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |cmd| Err(ExecError::failed(cmd, Some(1), message.clone())))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandGateway for ScriptedGateway {
    async fn execute(
        &self,
        command: &GitCommand,
        options: &ExecOptions,
    ) -> Result<String, ExecError> {
        self.calls.lock().unwrap().push(Call {
            command: command.to_string(),
            options: options.clone(),
        });
        (self.responder)(command)
    }
}

/// Run git in `dir`, panicking on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// An initialized repository with no commits, inside its own temp dir
pub fn create_empty_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().join("repo");
    std::fs::create_dir(&repo_path).unwrap();

    git(&repo_path, &["init", "--quiet"]);
    git(&repo_path, &["config", "user.name", "Test User"]);
    git(&repo_path, &["config", "user.email", "test@example.com"]);
    git(&repo_path, &["config", "commit.gpgsign", "false"]);

    (temp_dir, repo_path)
}

/// A repository with a single commit containing `README.md`
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let (temp_dir, repo_path) = create_empty_repo();
    commit_file(&repo_path, "README.md", "# test\n", "Initial commit");
    (temp_dir, repo_path)
}

pub fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(repo.join(name), content).unwrap();
    git(repo, &["add", name]);
    git(repo, &["commit", "--quiet", "-m", message]);
}
