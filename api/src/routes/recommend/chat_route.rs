//! POST /recommend/chat — conversational recommendation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use recommender::GeoPoint;
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    middleware_layer::json_extractor::request_id,
    routes::recommend::{recommend_request::ChatRequest, recommend_response::RecommendResponse},
};

/// Handler: POST /recommend/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/recommend/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"something spicy","meal_type":"dinner","lat":12.97,"lng":77.59}'
/// ```
pub async fn recommend_chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(req) = body?;
    let request_id = request_id(&headers);

    debug!(
        request_id = %request_id,
        has_message = req.message.is_some(),
        meal_type = ?req.meal_type,
        "recommend_chat: start"
    );

    let location = GeoPoint::from_parts(req.lat, req.lng);
    let items = state
        .recommender
        .recommend_by_chat(req.message.as_deref(), req.meal_type.as_deref(), location)
        .await?;

    info!(request_id = %request_id, items = items.len(), "recommend_chat: done");

    Ok(ApiResponse::success(RecommendResponse::from(items)).into_response_with_status(StatusCode::OK))
}
