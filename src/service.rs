//! The three core operations shared by the REST and GraphQL
//! transports. Each request validates its input, calls the delegate,
//! and assembles the reply; any failure short-circuits to the error
//! path with no retries and no partial responses.

use tracing::debug;

use crate::agent::{collect_text, Message, WorkflowInput};
use crate::error::{DelegateError, GatewayError};
use crate::state::AppState;
use crate::types::{ChatResponse, WeatherResponse, WorkflowResponse};

/// Reject absent or empty required fields before any delegate call.
pub fn require(field: &'static str, value: Option<String>) -> Result<String, GatewayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GatewayError::MissingField(field)),
    }
}

/// Forward a chat message to the agent and assemble its streamed reply.
pub async fn chat(state: &AppState, message: &str) -> Result<ChatResponse, GatewayError> {
    let response = agent_reply(
        state,
        Message::user(message),
        "Failed to process chat request",
    )
    .await?;

    Ok(ChatResponse {
        response,
        agent: state.agent.name().to_string(),
        success: true,
    })
}

/// Ask the agent for the current weather at a location.
pub async fn weather(state: &AppState, location: &str) -> Result<WeatherResponse, GatewayError> {
    let prompt = format!("What's the current weather in {}?", location);
    let weather = agent_reply(
        state,
        Message::user(prompt),
        "Failed to get weather information",
    )
    .await?;

    Ok(WeatherResponse {
        location: location.to_string(),
        weather,
        success: true,
    })
}

/// Run the weather workflow for a city.
pub async fn execute_workflow(
    state: &AppState,
    city: &str,
) -> Result<WorkflowResponse, GatewayError> {
    const CONTEXT: &str = "Failed to execute weather workflow";

    let outcome = state
        .workflow
        .execute(WorkflowInput {
            city: city.to_string(),
        })
        .await
        .map_err(|e| delegate_error(CONTEXT, e))?;

    debug!(
        "workflow finished for {} execution_id={:?}",
        city, outcome.execution_id
    );

    let forecast =
        serde_json::to_string(&outcome.result).map_err(|e| GatewayError::Internal(e.into()))?;

    Ok(WorkflowResponse {
        city: city.to_string(),
        forecast,
        execution_id: outcome.execution_id.unwrap_or_default(),
        success: true,
    })
}

async fn agent_reply(
    state: &AppState,
    message: Message,
    context: &'static str,
) -> Result<String, GatewayError> {
    let stream = state
        .agent
        .stream(vec![message])
        .await
        .map_err(|e| delegate_error(context, e))?;

    collect_text(stream, &state.config.limits)
        .await
        .map_err(|source| GatewayError::Delegate { context, source })
}

fn delegate_error(context: &'static str, e: anyhow::Error) -> GatewayError {
    GatewayError::Delegate {
        context,
        source: DelegateError::Upstream(e.to_string()),
    }
}
