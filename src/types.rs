//! Request and response payload types. Requests deserialize required
//! fields as `Option` so that absent and empty values share one
//! validation path; response types serve both the REST and GraphQL
//! transports.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRequest {
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ChatResponse {
    pub response: String,
    pub agent: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct WeatherResponse {
    pub location: String,
    pub weather: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResponse {
    pub city: String,
    /// Workflow result serialized to JSON text; the same shape on both
    /// transports.
    pub forecast: String,
    /// Empty string when the upstream engine assigned no identifier.
    pub execution_id: String,
    pub success: bool,
}
