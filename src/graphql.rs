//! GraphQL surface: the same four operations as the REST routes,
//! served from a single /graphql endpoint. Resolvers call into
//! `service` and adapt failures to GraphQL errors with an
//! `extensions.code`; success payloads carry `success: true`.

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::response::{Html, IntoResponse};
use axum::Extension;

use crate::service;
use crate::state::AppState;
use crate::types::{ChatResponse, WeatherResponse, WorkflowResponse};

pub type GatewaySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Liveness probe for the GraphQL surface.
    async fn health(&self) -> &str {
        "Weather Agent GraphQL API is running!"
    }

    async fn weather(
        &self,
        ctx: &Context<'_>,
        location: String,
    ) -> async_graphql::Result<WeatherResponse> {
        let state = ctx.data_unchecked::<AppState>();
        let location = service::require("Location", Some(location)).map_err(|e| e.extend())?;
        service::weather(state, &location)
            .await
            .map_err(|e| e.extend())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn chat(
        &self,
        ctx: &Context<'_>,
        message: String,
    ) -> async_graphql::Result<ChatResponse> {
        let state = ctx.data_unchecked::<AppState>();
        let message = service::require("Message", Some(message)).map_err(|e| e.extend())?;
        service::chat(state, &message).await.map_err(|e| e.extend())
    }

    async fn execute_workflow(
        &self,
        ctx: &Context<'_>,
        city: String,
    ) -> async_graphql::Result<WorkflowResponse> {
        let state = ctx.data_unchecked::<AppState>();
        let city = service::require("City", Some(city)).map_err(|e| e.extend())?;
        service::execute_workflow(state, &city)
            .await
            .map_err(|e| e.extend())
    }
}

pub fn build_schema(state: AppState) -> GatewaySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn handler(
    Extension(schema): Extension<GatewaySchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

/// Interactive playground, kept on GET for browser use.
pub async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
