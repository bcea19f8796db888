use std::path::PathBuf;

use crate::domain::branch::BranchName;

/// One record in the ticket file.
#[derive(Debug, Clone)]
pub struct TicketEntry {
    pub branch: BranchName,
    pub source_dir: PathBuf,
    pub ticket_url: String,
    pub remote_url: String,
}

impl TicketEntry {
    /// Renders the entry as a single Org headline, without the trailing
    /// newline. Control characters in any field become spaces.
    pub fn to_org_line(&self) -> String {
        format!(
            "** TODO Ticket: {} [[{}][ticket]] source: {} remote: {}",
            single_line(self.branch.as_str()),
            single_line(&self.ticket_url),
            single_line(&self.source_dir.display().to_string()),
            single_line(&self.remote_url)
        )
    }
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
