//! GET /recommend — query-parameter recommendation.

use std::sync::Arc;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    middleware_layer::json_extractor::request_id,
    routes::{
        params::optional_location,
        recommend::{recommend_request::RecommendQuery, recommend_response::RecommendResponse},
    },
};

/// Handler: GET /recommend
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8080/recommend?meal_type=breakfast&lat=12.97&lng=77.59'
/// ```
pub async fn recommend_query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<RecommendQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(q) = params?;
    let request_id = request_id(&headers);

    debug!(
        request_id = %request_id,
        query = ?q.query,
        meal_type = ?q.meal_type,
        "recommend_query: start"
    );

    let location = optional_location(q.lat.as_deref(), q.lng.as_deref())?;
    let items = state
        .recommender
        .recommend_by_query(q.query.as_deref(), q.meal_type.as_deref(), location)
        .await?;

    info!(request_id = %request_id, items = items.len(), "recommend_query: done");

    Ok(ApiResponse::success(RecommendResponse::from(items)).into_response_with_status(StatusCode::OK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{body_json, state_with_reply};
    use axum::response::IntoResponse;

    async fn call(q: RecommendQuery) -> serde_json::Value {
        let resp = recommend_query(State(state_with_reply("[]")), HeaderMap::new(), Ok(Query(q)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        body_json(resp).await
    }

    #[tokio::test]
    async fn meal_type_filters_items() {
        let json = call(RecommendQuery {
            meal_type: Some("Breakfast".into()),
            ..Default::default()
        })
        .await;
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["availability"], "breakfast");
    }

    #[tokio::test]
    async fn unknown_meal_type_falls_back_to_random_sample() {
        let json = call(RecommendQuery {
            meal_type: Some("brunch".into()),
            ..Default::default()
        })
        .await;
        assert_eq!(json["data"]["count"], 3);
    }

    #[tokio::test]
    async fn blank_params_are_absent() {
        let json = call(RecommendQuery {
            query: Some("".into()),
            meal_type: Some(" ".into()),
            lat: Some("".into()),
            lng: Some("".into()),
        })
        .await;
        assert_eq!(json["data"]["count"], 3);
    }

    #[tokio::test]
    async fn garbage_coordinate_is_rejected() {
        let err = recommend_query(
            State(state_with_reply("[]")),
            HeaderMap::new(),
            Ok(Query(RecommendQuery {
                lat: Some("north".into()),
                lng: Some("1".into()),
                ..Default::default()
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
