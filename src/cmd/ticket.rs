use clap::Args;

use crate::config::StoredConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::ticket::{TicketWorkflowOutcome, start_ticket};

/// Values given on the command line; each one overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct TicketArgs {
    /// The URL to the ticket.
    #[arg(long, value_name = "URL")]
    pub ticket_url: Option<String>,

    /// The URL to the remote repository that the ticket's work will be done in.
    #[arg(long, value_name = "URL")]
    pub remote_repository_url: Option<String>,

    /// The name of the main branch that ticket branches are created from.
    #[arg(long, value_name = "NAME")]
    pub main_branch_name: Option<String>,

    /// The directory under which the repository is cloned.
    #[arg(long, value_name = "DIR")]
    pub local_repository_parent_dir: Option<String>,

    /// A regular expression with one capture group that extracts the branch
    /// name from the ticket URL.
    #[arg(long, value_name = "REGEX")]
    pub branch_name_regex: Option<String>,

    /// The Org file that ticket entries are appended to.
    #[arg(long, value_name = "FILE")]
    pub ticket_file_path: Option<String>,
}

impl From<TicketArgs> for StoredConfig {
    fn from(args: TicketArgs) -> Self {
        StoredConfig {
            local_repository_parent_dir: args.local_repository_parent_dir,
            branch_name_regex: args.branch_name_regex,
            ticket_file_path: args.ticket_file_path,
            ticket_url: args.ticket_url,
            remote_repository_url: args.remote_repository_url,
            main_branch_name: args.main_branch_name,
        }
    }
}

pub async fn run(ctx: &AppContext) -> AppResult<TicketWorkflowOutcome> {
    start_ticket(ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_arguments_into_overrides() {
        let args = TicketArgs {
            ticket_url: Some("https://jira/browse/TCK-1".to_string()),
            main_branch_name: Some("main".to_string()),
            ..TicketArgs::default()
        };
        let overrides = StoredConfig::from(args);
        assert_eq!(overrides.ticket_url.as_deref(), Some("https://jira/browse/TCK-1"));
        assert_eq!(overrides.main_branch_name.as_deref(), Some("main"));
        assert_eq!(overrides.remote_repository_url, None);
    }
}
