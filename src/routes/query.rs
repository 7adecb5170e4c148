use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app::response::RuntimeConfig;
use crate::config::app::AppConfig;

pub fn public_router() -> Router<Arc<AppConfig>> {
    Router::new().route("/ping", get(ping))
}

pub fn secured_router() -> Router<Arc<AppConfig>> {
    Router::new().route("/v1/config", get(runtime_config))
}

/// Liveness probe, deliberately outside the secured groups.
#[utoipa::path(
    get,
    path = "/ping",
    tag = "Query",
    responses((status = 200, description = "pong", body = String))
)]
pub async fn ping() -> &'static str {
    "pong"
}

#[utoipa::path(
    get,
    path = "/v1/config",
    tag = "Query",
    responses(
        (status = 200, description = "Resolved runtime configuration", body = RuntimeConfig),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn runtime_config(State(config): State<Arc<AppConfig>>) -> Json<RuntimeConfig> {
    Json(RuntimeConfig {
        api_port: config.api_port,
        static_server_base: config.static_server_base.clone(),
        webhook_url: config.webhook_url.clone(),
        secured: config.api_key.is_some(),
    })
}
