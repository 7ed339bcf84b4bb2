use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::service;
use crate::state::AppState;
use crate::types::{
    ChatRequest, ChatResponse, WeatherRequest, WeatherResponse, WorkflowRequest, WorkflowResponse,
};

/// Service metadata for the root route.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Weather Agent API is running!",
        "endpoints": {
            "graphql": "POST /graphql",
            "playground": "GET /graphql (in browser)",
            "rest_chat": "POST /chat",
            "rest_weather": "POST /weather",
            "rest_workflow": "POST /workflow"
        }
    }))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let message = service::require("Message", payload.message)?;
    Ok(Json(service::chat(&state, &message).await?))
}

pub async fn weather(
    State(state): State<AppState>,
    Json(payload): Json<WeatherRequest>,
) -> Result<Json<WeatherResponse>, GatewayError> {
    let location = service::require("Location", payload.location)?;
    Ok(Json(service::weather(&state, &location).await?))
}

pub async fn workflow(
    State(state): State<AppState>,
    Json(payload): Json<WorkflowRequest>,
) -> Result<Json<WorkflowResponse>, GatewayError> {
    let city = service::require("City", payload.city)?;
    Ok(Json(service::execute_workflow(&state, &city).await?))
}
