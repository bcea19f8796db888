use std::path::Path;

use async_trait::async_trait;

use crate::domain::branch::BranchName;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Clones `remote_url` into `target_dir`, which must not exist yet.
    async fn clone_repository(&self, remote_url: &str, target_dir: &Path) -> AppResult<()>;
    async fn pull(&self, repo_dir: &Path) -> AppResult<()>;
    async fn checkout_branch(&self, repo_dir: &Path, branch: &str) -> AppResult<()>;
    /// Creates `branch` from the current HEAD and switches to it.
    async fn create_branch(&self, repo_dir: &Path, branch: &BranchName) -> AppResult<()>;
}
