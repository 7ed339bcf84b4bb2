use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures crossing the agent/workflow delegate boundary.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// The delegate call or one of its stream items failed.
    #[error("{0}")]
    Upstream(String),
    #[error("upstream response exceeded {0} bytes")]
    TooLarge(usize),
    #[error("upstream stream produced no result within {0}s")]
    Timeout(u64),
}

/// Every failure a request handler can surface. One internal contract
/// shared by the REST and GraphQL transports; each adapts it at its
/// own boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required field was absent or empty. The delegate is never
    /// invoked for these.
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{context}: {source}")]
    Delegate {
        context: &'static str,
        source: DelegateError,
    },
    /// Last line of defense for anything the taxonomy above misses.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Wire shape of every error, on both transports.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingField(_) => StatusCode::BAD_REQUEST,
            GatewayError::Delegate {
                source: DelegateError::TooLarge(_),
                ..
            } => StatusCode::BAD_GATEWAY,
            GatewayError::Delegate {
                source: DelegateError::Timeout(_),
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Delegate { .. } | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable kind, exposed as `extensions.code` on GraphQL
    /// errors.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::MissingField(_) => "BAD_USER_INPUT",
            GatewayError::Delegate {
                source: DelegateError::TooLarge(_),
                ..
            } => "RESPONSE_TOO_LARGE",
            GatewayError::Delegate {
                source: DelegateError::Timeout(_),
                ..
            } => "DELEGATE_TIMEOUT",
            GatewayError::Delegate { .. } => "DELEGATE_FAILED",
            GatewayError::Internal(_) => "INTERNAL",
        }
    }

    pub fn into_envelope(self) -> ErrorEnvelope {
        match self {
            GatewayError::MissingField(field) => ErrorEnvelope {
                error: format!("{} is required", field),
                details: None,
            },
            GatewayError::Delegate { context, source } => ErrorEnvelope {
                error: context.to_string(),
                details: Some(non_empty_or_unknown(source.to_string())),
            },
            GatewayError::Internal(source) => ErrorEnvelope {
                error: "Internal server error".to_string(),
                details: Some(non_empty_or_unknown(source.to_string())),
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        } else {
            warn!("request rejected: {}", self);
        }
        (status, Json(self.into_envelope())).into_response()
    }
}

impl ErrorExtensions for GatewayError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
        })
    }
}

/// Delegates are assumed fallible but not assumed to say why.
fn non_empty_or_unknown(message: String) -> String {
    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
