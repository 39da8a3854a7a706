use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::WebhookError;
use crate::model::WebhookResponse;

/// Render a validation error as `{"error": ...}` with a matching status.
pub fn error_response(err: &WebhookError) -> Response {
    let status = match err {
        WebhookError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        WebhookError::NotFoundOrInactive(_) => StatusCode::NOT_FOUND,
        WebhookError::EventNotSubscribed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    tracing::warn!(status = status.as_u16(), error = %err);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": format!("{what} not found") }))).into_response()
}

/// 200 for a delivered webhook, 502 when every attempt failed.
pub fn delivery_response(response: WebhookResponse) -> Response {
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(response)).into_response()
}
