use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener as TokioTcpListener;
use tower_http::cors::CorsLayer;

use echoday_webhooks::dispatch::HttpTransport;
use echoday_webhooks::state::AppState;
use echoday_webhooks::store::MemoryStore;

/// Bodies received by a mock endpoint, in arrival order.
type Inbox = Arc<Mutex<Vec<Value>>>;

/// Start a mock webhook receiver that records every JSON body POSTed to
/// `/hook` and answers with `status`.
async fn start_mock_receiver(status: u16) -> (String, Inbox) {
    let inbox: Inbox = Arc::new(Mutex::new(Vec::new()));
    let status = StatusCode::from_u16(status).unwrap();

    async fn record(
        State((inbox, status)): State<(Inbox, StatusCode)>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        inbox.lock().unwrap().push(body);
        status
    }

    let app = Router::new()
        .route("/hook", post(record))
        .with_state((inbox.clone(), status));
    let listener = TokioTcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (format!("http://{addr}/hook"), inbox)
}

/// Start the API on a random port with an in-memory store.
async fn setup() -> String {
    let state = AppState::new(Box::new(MemoryStore::new()), Arc::new(HttpTransport::new()));
    let app = echoday_webhooks::routes::router(state)
        .layer(axum::middleware::from_fn(echoday_webhooks::middleware::request_tracing))
        .layer(CorsLayer::permissive());
    let listener = TokioTcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Test helpers to reduce boilerplate
// ---------------------------------------------------------------------------

/// GET a path and assert expected status. Returns parsed JSON body if present.
async fn assert_get(base: &str, path: &str, status: u16) -> Option<Value> {
    let res = reqwest::get(format!("{base}{path}")).await.unwrap();
    assert_eq!(res.status(), status, "GET {path} expected {status}, got {}", res.status());
    if status == 204 {
        return None;
    }
    res.json().await.ok()
}

/// Send a JSON request (POST, PATCH, DELETE) and assert expected status.
async fn assert_json_request(
    base: &str,
    method: &str,
    path: &str,
    body: Value,
    status: u16,
) -> Option<Value> {
    let client = reqwest::Client::new();
    let res = match method {
        "POST" => client.post(format!("{base}{path}")).json(&body).send().await.unwrap(),
        "PATCH" => client.patch(format!("{base}{path}")).json(&body).send().await.unwrap(),
        "DELETE" => client.delete(format!("{base}{path}")).json(&body).send().await.unwrap(),
        _ => panic!("unsupported method: {method}"),
    };
    assert_eq!(res.status(), status, "{method} {path} expected {status}, got {}", res.status());
    if status == 204 {
        return None;
    }
    res.json().await.ok()
}

async fn create_webhook(base: &str, body: Value) -> Value {
    assert_json_request(base, "POST", "/v1/webhooks", body, 201)
        .await
        .expect("created webhook body")
}

fn task_completed(title: &str) -> Value {
    json!({
        "event": "task_completed",
        "timestamp": "2024-05-01T09:00:00Z",
        "user": { "id": "u1", "name": "Ada" },
        "data": { "title": title }
    })
}

// ===========================================================================
// System
// ===========================================================================

#[tokio::test]
async fn test_health() {
    let base = setup().await;
    assert_get(&base, "/v1/health", 204).await;
}

#[tokio::test]
async fn test_about_reports_version() {
    let base = setup().await;
    let body = assert_get(&base, "/v1/about", 200).await.unwrap();
    assert_eq!(body["versions"]["echoday-webhooks"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["webhooks"]["configured"], 0);
    assert_eq!(body["integrations"], 13);
}

#[tokio::test]
async fn test_request_id_header() {
    let base = setup().await;
    let res = reqwest::get(format!("{base}/v1/health")).await.unwrap();
    assert!(res.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_openapi_lists_webhook_paths() {
    let base = setup().await;
    let spec = assert_get(&base, "/v1/openapi.json", 200).await.unwrap();
    let paths = spec["paths"].as_object().unwrap();
    assert!(paths.contains_key("/v1/webhooks"));
    assert!(paths.contains_key("/v1/webhooks/{id}/trigger"));
    assert!(paths.contains_key("/v1/templates"));
}

// ===========================================================================
// Webhooks: lifecycle
// ===========================================================================

#[tokio::test]
async fn test_webhooks_lifecycle() {
    let base = setup().await;

    let created = create_webhook(
        &base,
        json!({
            "name": "Team Slack",
            "type": "slack",
            "url": "https://hooks.slack.com/services/T1/B1/XYZ",
            "events": ["task_completed"]
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("webhook_"));
    assert_eq!(created["name"], "Team Slack");
    assert_eq!(created["type"], "slack");
    assert_eq!(created["isActive"], true);
    assert!(created.get("createdAt").is_some());
    assert!(created.get("lastTriggered").is_none());

    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let fetched = assert_get(&base, &format!("/v1/webhooks/{id}"), 200).await.unwrap();
    assert_eq!(fetched, created);

    assert_json_request(&base, "DELETE", &format!("/v1/webhooks/{id}"), json!({}), 204).await;
    assert_get(&base, &format!("/v1/webhooks/{id}"), 404).await;
    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_webhooks_empty_list_on_fresh_server() {
    let base = setup().await;
    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_fills_template_defaults() {
    let base = setup().await;
    let created = create_webhook(
        &base,
        json!({
            "name": "Zaps",
            "type": "zapier",
            "url": "https://hooks.zapier.com/hooks/catch/1/abc/",
            "settings": { "retryCount": 5 }
        }),
    )
    .await;
    assert_eq!(created["settings"]["retryCount"], 5);
    assert_eq!(created["settings"]["timeout"], 10000);
    assert_eq!(created["settings"]["includeDetails"], true);
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let base = setup().await;
    for url in ["ftp://example.com/hook", "not a url", "example.com/hook"] {
        let body = assert_json_request(
            &base,
            "POST",
            "/v1/webhooks",
            json!({ "name": "bad", "url": url }),
            400,
        )
        .await
        .unwrap();
        assert!(body["error"].as_str().unwrap().contains("invalid webhook URL"));
    }
    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_webhooks_delete_nonexistent() {
    let base = setup().await;
    assert_json_request(&base, "DELETE", "/v1/webhooks/nonexistent-id", json!({}), 404).await;
}

#[tokio::test]
async fn test_webhooks_delete_twice_returns_404_second_time() {
    let base = setup().await;
    let created = create_webhook(&base, json!({ "name": "x", "url": "https://example.com/hook" })).await;
    let id = created["id"].as_str().unwrap();
    assert_json_request(&base, "DELETE", &format!("/v1/webhooks/{id}"), json!({}), 204).await;
    assert_json_request(&base, "DELETE", &format!("/v1/webhooks/{id}"), json!({}), 404).await;
}

#[tokio::test]
async fn test_webhooks_multiple_create_and_list() {
    let base = setup().await;
    let mut ids = Vec::new();
    for i in 1..=3 {
        let created = create_webhook(
            &base,
            json!({ "name": format!("hook {i}"), "url": format!("https://example.com/hook{i}") }),
        )
        .await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }
    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    let listed: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed.len(), 3);
    for id in &ids {
        assert!(listed.contains(id));
    }
}

#[tokio::test]
async fn test_update_toggles_active_and_filters_list() {
    let base = setup().await;
    let a = create_webhook(&base, json!({ "name": "a", "url": "https://example.com/a" })).await;
    create_webhook(&base, json!({ "name": "b", "url": "https://example.com/b" })).await;
    let id = a["id"].as_str().unwrap();

    let updated = assert_json_request(
        &base,
        "PATCH",
        &format!("/v1/webhooks/{id}"),
        json!({ "isActive": false }),
        200,
    )
    .await
    .unwrap();
    assert_eq!(updated["isActive"], false);
    assert_eq!(updated["name"], "a");

    let active = assert_get(&base, "/v1/webhooks?active=true", 200).await.unwrap();
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["name"], "b");
}

#[tokio::test]
async fn test_update_replaces_settings_wholesale() {
    let base = setup().await;
    let created = create_webhook(
        &base,
        json!({
            "name": "chat",
            "type": "slack",
            "url": "https://hooks.slack.com/services/T/B/X",
            "settings": { "channel": "#general" }
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let updated = assert_json_request(
        &base,
        "PATCH",
        &format!("/v1/webhooks/{id}"),
        json!({ "settings": { "username": "Bot" } }),
        200,
    )
    .await
    .unwrap();
    assert_eq!(updated["settings"], json!({ "username": "Bot" }));
}

#[tokio::test]
async fn test_update_invalid_url_and_unknown_id() {
    let base = setup().await;
    let created = create_webhook(&base, json!({ "name": "a", "url": "https://example.com/a" })).await;
    let id = created["id"].as_str().unwrap();

    assert_json_request(
        &base,
        "PATCH",
        &format!("/v1/webhooks/{id}"),
        json!({ "url": "mailto:someone@example.com" }),
        400,
    )
    .await;
    let fetched = assert_get(&base, &format!("/v1/webhooks/{id}"), 200).await.unwrap();
    assert_eq!(fetched["url"], "https://example.com/a");

    assert_json_request(&base, "PATCH", "/v1/webhooks/missing", json!({ "name": "x" }), 404).await;
}

// ===========================================================================
// Webhooks: delivery
// ===========================================================================

#[tokio::test]
async fn test_trigger_slack_formats_message() {
    let base = setup().await;
    let (hook_url, inbox) = start_mock_receiver(200).await;
    let created = create_webhook(
        &base,
        json!({
            "name": "slack",
            "type": "slack",
            "url": hook_url,
            "events": ["task_completed"],
            "settings": { "channel": "#done" }
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = assert_json_request(
        &base,
        "POST",
        &format!("/v1/webhooks/{id}/trigger"),
        task_completed("Buy milk"),
        200,
    )
    .await
    .unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["statusCode"], 200);

    let received = inbox.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["text"], "✅ Ada görevi tamamladı: Buy milk");
    assert_eq!(received[0]["channel"], "#done");
    assert_eq!(received[0]["username"], "EchoDay");

    let fetched = assert_get(&base, &format!("/v1/webhooks/{id}"), 200).await.unwrap();
    assert!(fetched["lastTriggered"].is_string());
}

#[tokio::test]
async fn test_trigger_generic_passes_payload_through() {
    let base = setup().await;
    let (hook_url, inbox) = start_mock_receiver(204).await;
    let created = create_webhook(
        &base,
        json!({ "name": "n8n", "type": "n8n", "url": hook_url, "events": ["task_completed"] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let payload = task_completed("Write report");
    assert_json_request(&base, "POST", &format!("/v1/webhooks/{id}/trigger"), payload.clone(), 200).await;

    let received = inbox.lock().unwrap().clone();
    assert_eq!(received, vec![payload]);
}

#[tokio::test]
async fn test_trigger_inactive_is_not_delivered() {
    let base = setup().await;
    let (hook_url, inbox) = start_mock_receiver(200).await;
    let created = create_webhook(
        &base,
        json!({ "name": "off", "url": hook_url, "isActive": false, "events": ["task_completed"] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let body = assert_json_request(
        &base,
        "POST",
        &format!("/v1/webhooks/{id}/trigger"),
        task_completed("x"),
        404,
    )
    .await
    .unwrap();
    assert!(body["error"].as_str().unwrap().contains("not active"));
    assert!(inbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_trigger_unknown_id() {
    let base = setup().await;
    let body = assert_json_request(
        &base,
        "POST",
        "/v1/webhooks/webhook_missing/trigger",
        task_completed("x"),
        404,
    )
    .await
    .unwrap();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_trigger_unsubscribed_event() {
    let base = setup().await;
    let (hook_url, inbox) = start_mock_receiver(200).await;
    let created = create_webhook(
        &base,
        json!({ "name": "goals", "url": hook_url, "events": ["goal_completed"] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    assert_json_request(&base, "POST", &format!("/v1/webhooks/{id}/trigger"), task_completed("x"), 422).await;
    assert!(inbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_trigger_failure_reports_status() {
    let base = setup().await;
    let (hook_url, inbox) = start_mock_receiver(500).await;
    let created = create_webhook(
        &base,
        json!({
            "name": "broken",
            "url": hook_url,
            "events": ["task_completed"],
            "settings": { "retryCount": 1 }
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = assert_json_request(
        &base,
        "POST",
        &format!("/v1/webhooks/{id}/trigger"),
        task_completed("x"),
        502,
    )
    .await
    .unwrap();
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "HTTP 500: Internal Server Error");
    assert_eq!(inbox.lock().unwrap().len(), 1);

    let fetched = assert_get(&base, &format!("/v1/webhooks/{id}"), 200).await.unwrap();
    assert!(fetched.get("lastTriggered").is_none());
}

#[tokio::test]
async fn test_broadcast_reaches_only_subscribed_active_hooks() {
    let base = setup().await;
    let (url_a, inbox_a) = start_mock_receiver(200).await;
    let (url_b, inbox_b) = start_mock_receiver(200).await;
    let (url_c, inbox_c) = start_mock_receiver(200).await;

    let a = create_webhook(&base, json!({ "name": "a", "url": url_a, "events": ["task_completed"] })).await;
    create_webhook(&base, json!({ "name": "b", "url": url_b, "events": ["daily_summary"] })).await;
    create_webhook(
        &base,
        json!({ "name": "c", "url": url_c, "events": ["task_completed"], "isActive": false }),
    )
    .await;

    let results = assert_json_request(&base, "POST", "/v1/events", task_completed("Fan out"), 200)
        .await
        .unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], a["id"]);
    assert_eq!(results[0]["response"]["success"], true);

    assert_eq!(inbox_a.lock().unwrap().len(), 1);
    assert!(inbox_b.lock().unwrap().is_empty());
    assert!(inbox_c.lock().unwrap().is_empty());
}

// ===========================================================================
// Test endpoint
// ===========================================================================

#[tokio::test]
async fn test_test_endpoint_sends_sample_without_storing() {
    let base = setup().await;
    let (hook_url, inbox) = start_mock_receiver(200).await;

    let response = assert_json_request(
        &base,
        "POST",
        "/v1/webhooks/test",
        json!({ "url": hook_url, "type": "discord" }),
        200,
    )
    .await
    .unwrap();
    assert_eq!(response["success"], true);

    let received = inbox.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["content"], "✅ Test Kullanıcısı görevi tamamladı: Test Görevi");

    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_test_endpoint_unreachable_and_invalid() {
    let base = setup().await;
    let response = assert_json_request(
        &base,
        "POST",
        "/v1/webhooks/test",
        json!({ "url": "http://127.0.0.1:1/hook" }),
        502,
    )
    .await
    .unwrap();
    assert_eq!(response["success"], false);
    assert!(response["error"].is_string());

    assert_json_request(&base, "POST", "/v1/webhooks/test", json!({ "url": "nope" }), 400).await;
}

#[tokio::test]
async fn test_create_with_verify() {
    let base = setup().await;
    let (good_url, inbox) = start_mock_receiver(200).await;
    let (bad_url, _) = start_mock_receiver(404).await;

    create_webhook(&base, json!({ "name": "ok", "url": good_url, "verify": true })).await;
    assert_eq!(inbox.lock().unwrap().len(), 1);

    let response = assert_json_request(
        &base,
        "POST",
        "/v1/webhooks",
        json!({ "name": "bad", "url": bad_url, "verify": true }),
        502,
    )
    .await
    .unwrap();
    assert_eq!(response["error"], "HTTP 404: Not Found");

    let list = assert_get(&base, "/v1/webhooks", 200).await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// ===========================================================================
// Templates and metrics
// ===========================================================================

#[tokio::test]
async fn test_templates() {
    let base = setup().await;
    let all = assert_get(&base, "/v1/templates", 200).await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 13);

    let chat = assert_get(&base, "/v1/templates/google-chat", 200).await.unwrap();
    assert_eq!(chat["name"], "Google Chat");

    assert_get(&base, "/v1/templates/myspace", 404).await;
}

#[tokio::test]
async fn test_metrics_count_deliveries() {
    let base = setup().await;
    let (hook_url, _) = start_mock_receiver(200).await;
    let created = create_webhook(
        &base,
        json!({ "name": "m", "url": hook_url, "events": ["task_completed"] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    assert_json_request(&base, "POST", &format!("/v1/webhooks/{id}/trigger"), task_completed("x"), 200).await;

    let res = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(res.status(), 200);
    let text = res.text().await.unwrap();
    assert!(text.contains("echoday_webhook_attempts_total 1"));
    assert!(text.contains("echoday_webhook_deliveries_total 1"));
    assert!(text.contains("echoday_webhook_failures_total 0"));
    assert!(text.contains("echoday_webhook_configs 1"));
}
