use std::sync::Arc;

use crate::config::TicketConfig;
use crate::services::VersionControlService;

#[derive(Clone)]
pub struct AppContext {
    pub config: TicketConfig,
    pub version_control: Arc<dyn VersionControlService>,
}

impl AppContext {
    pub fn new(config: TicketConfig, version_control: Arc<dyn VersionControlService>) -> Self {
        Self {
            config,
            version_control,
        }
    }
}
