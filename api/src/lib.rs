//! HTTP surface of the recommendation backend.

use std::sync::Arc;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::{ApiConfig, AppState};
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::json_extractor::{json_error_mapper, request_id_layer},
    routes::{
        health::health_route::health,
        recommend::{chat_route::recommend_chat, query_route::recommend_query},
        vendors::nearby_route::nearby_vendors,
    },
};

/// Builds the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommend/chat", post(recommend_chat))
        .route("/recommend", get(recommend_query))
        .route("/vendors/nearby", get(nearby_vendors))
        .route("/health", get(health))
        .layer(middleware::from_fn(json_error_mapper))
        .layer(middleware::from_fn(request_id_layer))
        .with_state(state)
}

/// Wires state from the environment and serves until Ctrl+C.
///
/// # Errors
/// Configuration, dataset, bind or server failures.
pub async fn start() -> Result<(), AppError> {
    let config = ApiConfig::from_env();
    let state = Arc::new(AppState::from_env(&config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
