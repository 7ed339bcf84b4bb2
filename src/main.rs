mod agent;
mod config;
mod error;
mod graphql;
mod handlers;
mod mastra_service;
mod routes;
mod service;
mod state;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use config::Config;
use mastra_service::MastraServiceClient;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_gateway=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        "Upstream agent service: {} (agent={}, workflow={})",
        config.mastra.base_url, config.mastra.agent_id, config.mastra.workflow_id
    );

    // One delegate client for the process; the router borrows it as
    // both the agent and the workflow interface.
    let mastra = Arc::new(MastraServiceClient::new(&config.mastra)?);
    let state = AppState::new(config.clone(), mastra.clone(), mastra);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = Router::new()
        .merge(routes::create_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
