// file: src/server/mod.rs
// description: axum HTTP server exposing the question answering endpoint
// reference: https://docs.rs/axum

mod handlers;
mod models;

pub use handlers::health_report;
pub use models::{AskRequest, AskResponse, ErrorResponse};

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::PipelineFactory;
use axum::Router;
use axum::routing::{get, post};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub factory: PipelineFactory,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(factory: PipelineFactory) -> Self {
        let request_timeout = factory.config().server.request_timeout();
        Self {
            factory,
            request_timeout,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ask", post(handlers::ask))
        .route("/api/ask/", post(handlers::ask))
        .route("/api/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    let address = config.server.bind_address();
    let state = AppState::new(PipelineFactory::new(config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
