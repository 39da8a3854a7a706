use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::model::WebhookType;
use crate::state::AppState;
use crate::templates;

use super::helpers::not_found;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/templates", get(list_templates))
        .route("/v1/templates/{type}", get(get_template))
}

async fn list_templates(State(st): State<AppState>) -> Response {
    Json(st.service.list_templates()).into_response()
}

async fn get_template(Path(kind): Path<String>) -> Response {
    let template = serde_json::from_value::<WebhookType>(serde_json::Value::String(kind))
        .ok()
        .and_then(templates::find);
    match template {
        Some(template) => Json(template).into_response(),
        None => not_found("template"),
    }
}
