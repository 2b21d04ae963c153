//! GET /health — text-model backend probe.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

/// Handler: GET /health
///
/// Always answers 200; `data.ok` tells whether the model backend is usable.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let status = state.llm.health().await;
    ApiResponse::success(status).into_response_with_status(StatusCode::OK)
}
