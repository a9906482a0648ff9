//! HTTP server assembly: router, middleware layers and the listener.

use std::sync::Arc;

use http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::{analysis_router, AnalysisAppState};
use crate::config::ServerConfig;
use crate::ports::LlmInvoker;

/// Builds the application router with tracing, timeout and CORS layers.
pub fn build_app(config: &ServerConfig, invoker: Arc<dyn LlmInvoker>) -> Router {
    analysis_router(AnalysisAppState::new(invoker))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(
    config: &ServerConfig,
    invoker: Arc<dyn LlmInvoker>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let app = build_app(config, invoker);

    tracing::info!(%addr, environment = ?config.environment, "BugSense AI server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
