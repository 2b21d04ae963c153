//! GET /vendors/nearby — closest vendors to the user.

use std::sync::Arc;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    middleware_layer::json_extractor::request_id,
    routes::{
        params::required_location,
        vendors::nearby_request::{NearbyQuery, NearbyResponse},
    },
};

/// Handler: GET /vendors/nearby
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8080/vendors/nearby?lat=12.97&lng=77.59'
/// ```
pub async fn nearby_vendors(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<NearbyQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(q) = params?;
    let location = required_location(q.lat.as_deref(), q.lng.as_deref())?;

    let vendors = state.recommender.nearby_vendors(location).await?;

    info!(
        request_id = %request_id(&headers),
        vendors = vendors.len(),
        "nearby_vendors: done"
    );

    let body = NearbyResponse {
        count: vendors.len(),
        vendors,
    };
    Ok(ApiResponse::success(body).into_response_with_status(StatusCode::OK))
}
