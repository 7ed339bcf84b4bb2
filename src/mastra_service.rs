use anyhow::{bail, Context, Result};
use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::agent::interface::{
    AgentInterface, Message, TextStream, WorkflowInput, WorkflowInterface, WorkflowOutcome,
};
use crate::config::MastraConfig;

/// HTTP client for the upstream Mastra agent service. One instance is
/// built at startup and shared; the API key travels with each request
/// as a bearer credential.
#[derive(Debug, Clone)]
pub struct MastraServiceClient {
    client: Client,
    base_url: String,
    agent_id: String,
    workflow_id: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct StreamRequest<'a> {
    messages: &'a [Message],
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    input: &'a WorkflowInput,
}

impl MastraServiceClient {
    pub fn new(config: &MastraConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent_id: config.agent_id.clone(),
            workflow_id: config.workflow_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post(&self, url: &str, body: &impl Serialize) -> Result<reqwest::Response> {
        let request_id = Uuid::new_v4().to_string();
        debug!("POST {} request_id={}", url, request_id);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("x-request-id", request_id)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("upstream returned {}: {}", status, body.trim());
        }
        Ok(response)
    }
}

#[async_trait]
impl AgentInterface for MastraServiceClient {
    fn name(&self) -> &str {
        &self.agent_id
    }

    async fn stream(&self, messages: Vec<Message>) -> Result<TextStream, anyhow::Error> {
        let url = format!("{}/api/agents/{}/stream", self.base_url, self.agent_id);
        let response = self
            .post(&url, &StreamRequest {
                messages: &messages,
            })
            .await?;

        let mut body = response.bytes_stream();
        let fragments = try_stream! {
            // Network chunks can split a multi-byte character; hold the
            // undecodable tail until the rest arrives.
            let mut pending: Vec<u8> = Vec::new();
            while let Some(chunk) = body.next().await {
                let chunk = chunk.context("upstream stream failed")?;
                pending.extend_from_slice(&chunk);
                let fragment = take_valid_prefix(&mut pending)?;
                if !fragment.is_empty() {
                    yield fragment;
                }
            }
            if !pending.is_empty() {
                Err(anyhow::anyhow!("upstream stream ended mid-character"))?;
            }
        };

        Ok(Box::new(Box::pin(fragments)))
    }
}

#[async_trait]
impl WorkflowInterface for MastraServiceClient {
    async fn execute(&self, input: WorkflowInput) -> Result<WorkflowOutcome, anyhow::Error> {
        let url = format!(
            "{}/api/workflows/{}/execute",
            self.base_url, self.workflow_id
        );
        let response = self.post(&url, &ExecuteRequest { input: &input }).await?;
        let outcome = response
            .json::<WorkflowOutcome>()
            .await
            .context("upstream workflow returned an unparseable body")?;
        Ok(outcome)
    }
}

/// Split off the longest valid UTF-8 prefix of `pending`, leaving any
/// incomplete trailing sequence in place.
fn take_valid_prefix(pending: &mut Vec<u8>) -> Result<String> {
    let valid = match std::str::from_utf8(pending) {
        Ok(_) => pending.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(e) => bail!("upstream produced invalid UTF-8: {}", e),
    };
    let fragment = String::from_utf8_lossy(&pending[..valid]).into_owned();
    pending.drain(..valid);
    Ok(fragment)
}
