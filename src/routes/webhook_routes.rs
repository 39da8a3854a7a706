use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::model::{NewWebhook, WebhookPayload, WebhookResponse, WebhookType, WebhookUpdate};
use crate::state::AppState;
use crate::templates;

use super::helpers::{delivery_response, error_response, not_found};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/webhooks", post(create_webhook).get(list_webhooks))
        .route("/v1/webhooks/test", post(test_webhook))
        .route(
            "/v1/webhooks/{id}",
            get(get_webhook).patch(update_webhook).delete(delete_webhook),
        )
        .route("/v1/webhooks/{id}/trigger", post(trigger_webhook))
        .route("/v1/events", post(broadcast_event))
}

#[derive(Deserialize)]
struct CreateWebhook {
    #[serde(flatten)]
    webhook: NewWebhook,
    /// Send a test event first and refuse to store the webhook if it fails.
    #[serde(default)]
    verify: bool,
}

async fn create_webhook(State(st): State<AppState>, Json(body): Json<CreateWebhook>) -> Response {
    let mut new = body.webhook;
    if let Some(template) = templates::find(new.kind) {
        new.settings = new.settings.with_defaults(&template.default_settings.to_settings());
    }

    if body.verify {
        match st.service.test_webhook(&new.url, new.kind).await {
            Ok(response) if response.success => {}
            Ok(response) => return delivery_response(response),
            Err(e) => return error_response(&e),
        }
    }

    let id = match st.service.add_webhook(new).await {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    match st.service.get_webhook(&id).await {
        Some(config) => (StatusCode::CREATED, Json(config)).into_response(),
        // Removed by a concurrent request before we could read it back.
        None => not_found("webhook"),
    }
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    active: bool,
}

async fn list_webhooks(State(st): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let hooks = if query.active {
        st.service.list_active_webhooks().await
    } else {
        st.service.list_webhooks().await
    };
    Json(hooks).into_response()
}

async fn get_webhook(State(st): State<AppState>, Path(id): Path<String>) -> Response {
    match st.service.get_webhook(&id).await {
        Some(config) => Json(config).into_response(),
        None => not_found("webhook"),
    }
}

async fn update_webhook(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<WebhookUpdate>,
) -> Response {
    match st.service.update_webhook(&id, update).await {
        Ok(true) => get_webhook(State(st), Path(id)).await,
        Ok(false) => not_found("webhook"),
        Err(e) => error_response(&e),
    }
}

async fn delete_webhook(State(st): State<AppState>, Path(id): Path<String>) -> Response {
    if st.service.remove_webhook(&id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("webhook")
    }
}

async fn trigger_webhook(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<WebhookPayload>,
) -> Response {
    match st.service.trigger_webhook(&id, &payload).await {
        Ok(response) => delivery_response(response),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct TestWebhook {
    url: String,
    #[serde(rename = "type", default)]
    kind: WebhookType,
}

async fn test_webhook(State(st): State<AppState>, Json(body): Json<TestWebhook>) -> Response {
    match st.service.test_webhook(&body.url, body.kind).await {
        Ok(response) => delivery_response(response),
        Err(e) => error_response(&e),
    }
}

#[derive(Serialize)]
struct BroadcastResult {
    id: String,
    response: WebhookResponse,
}

async fn broadcast_event(State(st): State<AppState>, Json(payload): Json<WebhookPayload>) -> Response {
    let results: Vec<_> = st
        .service
        .broadcast(&payload)
        .await
        .into_iter()
        .map(|(id, response)| BroadcastResult { id, response })
        .collect();
    Json(results).into_response()
}
