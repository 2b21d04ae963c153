//! Request-id propagation and envelope rewriting for non-JSON client errors.

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id from the incoming headers, or `"-"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
}

fn new_request_id() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Makes sure every request carries `X-Request-Id` and echoes it on the response.
pub async fn request_id_layer(mut req: Request<Body>, next: Next) -> Response {
    let id = match request_id(req.headers()) {
        "-" => new_request_id(),
        existing => existing.to_string(),
    };
    let value = HeaderValue::from_str(&id).ok();
    if let Some(v) = &value {
        req.headers_mut().insert(REQUEST_ID_HEADER, v.clone());
    }

    let mut res = next.run(req).await;
    if let Some(v) = value {
        res.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    res
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn code_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        _ => "CLIENT_ERROR",
    }
}

/// Guesses the offending field from a serde/axum rejection message.
fn guess_field(msg: &str) -> Option<String> {
    ["message", "meal_type", "mealType", "query", "lat", "lng"]
        .into_iter()
        .find(|key| msg.contains(&format!("`{key}`")) || msg.contains(&format!("{key}:")))
        .map(str::to_string)
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("invalid float") || msg.contains("expected f64") {
        Some("Coordinates must be decimal numbers, e.g. lat=12.97&lng=77.59.".into())
    } else if msg.contains("expected a string") || msg.contains("invalid type") {
        Some("Check the field types: message and meal_type are strings, lat/lng are numbers.".into())
    } else if msg.contains("Content-Type") {
        Some("Send the body as JSON with `Content-Type: application/json`.".into())
    } else {
        None
    }
}

/// Rewrites plain-text 4xx responses (axum rejections, unknown routes) into the JSON envelope.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();
    if !status.is_client_error() || is_json(res.headers()) {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let bytes: Bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let original = String::from_utf8_lossy(&bytes);
    let message = match original.trim() {
        "" => status.canonical_reason().unwrap_or("client error").to_string(),
        text => text.to_string(),
    };
    debug!(status = status.as_u16(), message = %message, "client error rewritten");

    let field = guess_field(&message);
    let hint = hint_for(&message);
    let details = if field.is_some() || hint.is_some() {
        vec![ApiErrorDetail { path: field, hint }]
    } else {
        Vec::new()
    };

    let envelope = ApiResponse::<()>::error(code_for(status), message, details);
    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}
