use std::path::PathBuf;

use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::branch::BranchName;
use crate::domain::repository::local_clone_path;
use crate::domain::ticket::TicketEntry;
use crate::error::AppResult;
use crate::infra::org_file::TicketFile;

#[derive(Debug)]
pub struct TicketWorkflowOutcome {
    pub branch: BranchName,
    pub source_dir: PathBuf,
    pub cloned: bool,
    pub created_branch: bool,
    pub ticket_file: PathBuf,
}

pub async fn start_ticket(ctx: &AppContext) -> AppResult<TicketWorkflowOutcome> {
    let config = &ctx.config;
    let vcs = &ctx.version_control;

    let branch = config.branch_pattern.extract(&config.ticket_url)?;
    let source_dir = local_clone_path(
        &config.local_repository_parent_dir,
        &config.remote_repository_url,
    )?;

    // An existing directory is trusted to be a clone of the same remote.
    let cloned = if source_dir.exists() {
        info!(dir = %source_dir.display(), "repository already present, pulling");
        if let Err(err) = vcs.pull(&source_dir).await {
            warn!(%err, "pull failed, continuing with local state");
        }
        false
    } else {
        info!(remote = %config.remote_repository_url, "cloning repository");
        vcs.clone_repository(&config.remote_repository_url, &source_dir)
            .await?;
        true
    };

    match config.main_branch_name.as_deref() {
        Some(main) => vcs.checkout_branch(&source_dir, main).await?,
        None => warn!("main_branch_name not configured, branching from current HEAD"),
    }

    let created_branch = match vcs.create_branch(&source_dir, &branch).await {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, branch = %branch, "could not create branch, switching to it instead");
            vcs.checkout_branch(&source_dir, branch.as_str()).await?;
            false
        }
    };

    let ticket_file = TicketFile::new(&config.ticket_file_path);
    ticket_file.append(&TicketEntry {
        branch: branch.clone(),
        source_dir: source_dir.clone(),
        ticket_url: config.ticket_url.clone(),
        remote_url: config.remote_repository_url.clone(),
    })?;

    Ok(TicketWorkflowOutcome {
        branch,
        source_dir,
        cloned,
        created_branch,
        ticket_file: ticket_file.path().to_path_buf(),
    })
}
