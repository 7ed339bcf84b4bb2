use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::graphql;
use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let schema = graphql::build_schema(state);

    Router::new()
        // Service metadata
        .route("/", get(handlers::service_info))
        // REST API routes
        .route("/chat", post(handlers::chat))
        .route("/weather", post(handlers::weather))
        .route("/workflow", post(handlers::workflow))
        // GraphQL endpoint + browser playground
        .route("/graphql", get(graphql::playground).post(graphql::handler))
        .layer(Extension(schema))
}
