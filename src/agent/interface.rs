use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

/// One role-tagged message forwarded to the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Lazy sequence of text fragments produced by the agent.
pub type TextStream = Box<dyn Stream<Item = Result<String, anyhow::Error>> + Send + Unpin>;

/// Interface for the conversational agent behind /chat and /weather.
/// The agent's reasoning and tool use live upstream; this is the whole
/// call contract the gateway depends on.
#[async_trait]
pub trait AgentInterface: Send + Sync {
    /// Name reported to callers in the `agent` response field.
    fn name(&self) -> &str;

    /// Start a streamed completion for the given messages.
    async fn stream(&self, messages: Vec<Message>) -> Result<TextStream, anyhow::Error>;
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowInput {
    pub city: String,
}

/// Result of a workflow run: the structured output plus the execution
/// identifier, when the upstream engine assigned one.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowOutcome {
    pub result: serde_json::Value,
    #[serde(default, rename = "executionId")]
    pub execution_id: Option<String>,
}

/// Interface for the multi-step weather workflow behind /workflow.
#[async_trait]
pub trait WorkflowInterface: Send + Sync {
    async fn execute(&self, input: WorkflowInput) -> Result<WorkflowOutcome, anyhow::Error>;
}
