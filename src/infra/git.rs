use std::ffi::OsStr;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::branch::BranchName;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Runs the system `git` binary, so credentials, SSH keys and
/// `~/.gitconfig` behave exactly as they do in a shell.
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn command<I, S>(&self, dir: &Path, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C").arg(dir).args(args);
        cmd
    }

    async fn run<I, S>(&self, dir: &Path, args: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command(dir, args);
        debug!(command = ?cmd.as_std(), "running git");

        let output = cmd
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "`git {}` in {} failed ({}): {}",
                describe_args(cmd.as_std()),
                dir.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

fn clone_args<'a>(remote_url: &'a str, target_dir: &'a Path) -> [&'a OsStr; 3] {
    [
        OsStr::new("clone"),
        OsStr::new(remote_url),
        target_dir.as_os_str(),
    ]
}

fn describe_args(cmd: &std::process::Command) -> String {
    cmd.get_args()
        .skip(2)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn clone_repository(&self, remote_url: &str, target_dir: &Path) -> AppResult<()> {
        let parent_dir = target_dir.parent().unwrap_or_else(|| Path::new("."));
        self.run(parent_dir, clone_args(remote_url, target_dir)).await
    }

    async fn pull(&self, repo_dir: &Path) -> AppResult<()> {
        self.run(repo_dir, ["pull"]).await
    }

    async fn checkout_branch(&self, repo_dir: &Path, branch: &str) -> AppResult<()> {
        self.run(repo_dir, ["checkout", branch]).await
    }

    async fn create_branch(&self, repo_dir: &Path, branch: &BranchName) -> AppResult<()> {
        if branch.as_str().is_empty() {
            return Err(AppError::VersionControl(
                "branch name cannot be empty".to_string(),
            ));
        }
        self.run(repo_dir, ["checkout", "-b", branch.as_str()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_git_inside_target_directory() {
        let git = GitCli::new();
        let cmd = git.command(Path::new("/src/flint"), ["checkout", "-b", "TCK-1"]);
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "git");
        let args: Vec<_> = std_cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, ["-C", "/src/flint", "checkout", "-b", "TCK-1"]);
        assert_eq!(describe_args(std_cmd), "checkout -b TCK-1");
    }

    #[test]
    fn clones_into_explicit_target_directory() {
        let git = GitCli::new();
        let target = Path::new("/src/flint");
        let cmd = git.command(
            Path::new("/src"),
            clone_args("https://github.com/timjstewart/flint.bundle", target),
        );
        assert_eq!(
            describe_args(cmd.as_std()),
            "clone https://github.com/timjstewart/flint.bundle /src/flint"
        );
    }

    #[tokio::test]
    async fn rejects_empty_branch_name() {
        let git = GitCli::new();
        let err = git
            .create_branch(Path::new("."), &BranchName(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::VersionControl(_)));
    }

    #[tokio::test]
    async fn reports_missing_program() {
        let git = GitCli {
            program: "tkt-definitely-not-git".to_string(),
        };
        let err = git.pull(Path::new(".")).await.unwrap_err();
        assert!(err.to_string().contains("failed to run git"));
    }
}
