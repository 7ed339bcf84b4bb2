//! Deterministic delegate doubles for handler and resolver tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream;

use super::interface::{
    AgentInterface, Message, TextStream, WorkflowInput, WorkflowInterface, WorkflowOutcome,
};

pub struct MockAgent {
    reply: Result<Vec<String>, String>,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<Message>>,
}

impl MockAgent {
    /// Agent whose stream yields the given fragments in order.
    pub fn streaming(parts: &[&str]) -> Self {
        Self {
            reply: Ok(parts.iter().map(|p| p.to_string()).collect()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    /// Agent whose stream call fails outright.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user_content(&self) -> Option<String> {
        self.last_messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl AgentInterface for MockAgent {
    fn name(&self) -> &str {
        "weather-agent"
    }

    async fn stream(&self, messages: Vec<Message>) -> Result<TextStream, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages;
        match &self.reply {
            Ok(parts) => {
                let items: Vec<Result<String, anyhow::Error>> =
                    parts.iter().cloned().map(Ok).collect();
                Ok(Box::new(stream::iter(items)))
            }
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

pub struct MockWorkflow {
    outcome: Result<(serde_json::Value, Option<String>), String>,
    calls: AtomicUsize,
}

impl MockWorkflow {
    pub fn returning(result: serde_json::Value, execution_id: Option<&str>) -> Self {
        Self {
            outcome: Ok((result, execution_id.map(|s| s.to_string()))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkflowInterface for MockWorkflow {
    async fn execute(&self, _input: WorkflowInput) -> Result<WorkflowOutcome, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok((result, execution_id)) => Ok(WorkflowOutcome {
                result: result.clone(),
                execution_id: execution_id.clone(),
            }),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
