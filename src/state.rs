use std::sync::Arc;

use crate::agent::{AgentInterface, WorkflowInterface};
use crate::config::Config;

/// Shared application state. Delegates are constructed once at startup
/// and injected here; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agent: Arc<dyn AgentInterface>,
    pub workflow: Arc<dyn WorkflowInterface>,
}

impl AppState {
    pub fn new(
        config: Config,
        agent: Arc<dyn AgentInterface>,
        workflow: Arc<dyn WorkflowInterface>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            agent,
            workflow,
        }
    }
}
