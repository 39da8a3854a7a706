use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/about", get(about))
}

async fn health() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Version, build target and a summary of what's configured.
async fn about(State(st): State<AppState>) -> Response {
    let active = st.service.list_active_webhooks().await.len();
    let info = json!({
        "versions": {
            "echoday-webhooks": env!("CARGO_PKG_VERSION"),
        },
        "build": {
            "target": std::env::consts::ARCH,
            "os": std::env::consts::OS,
        },
        "webhooks": {
            "configured": st.service.webhook_count().await,
            "active": active,
        },
        "integrations": st.service.list_templates().len(),
    });
    Json(info).into_response()
}
