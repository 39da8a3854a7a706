use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/openapi.json", get(openapi_spec))
}

fn id_param() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    })
}

async fn openapi_spec() -> Response {
    let event_names = [
        "task_completed",
        "task_created",
        "task_updated",
        "goal_completed",
        "daily_summary",
        "weekly_report",
        "reminder_triggered",
    ];
    let type_names: Vec<&str> = crate::templates::all()
        .iter()
        .map(|t| t.kind.as_str())
        .collect();

    let spec = json!({
        "openapi": "3.0.3",
        "info": {
            "title": "EchoDay webhook API",
            "description": "Manage and trigger outbound webhooks",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/v1/health": {
                "get": {
                    "tags": ["System"],
                    "summary": "Health check",
                    "operationId": "health",
                    "responses": { "204": { "description": "Healthy" } }
                }
            },
            "/v1/about": {
                "get": {
                    "tags": ["System"],
                    "summary": "API version info",
                    "operationId": "about",
                    "responses": { "200": { "description": "Version information" } }
                }
            },
            "/v1/webhooks": {
                "get": {
                    "tags": ["Webhooks"],
                    "summary": "List webhooks",
                    "operationId": "listWebhooks",
                    "parameters": [{
                        "name": "active",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "boolean" }
                    }],
                    "responses": { "200": { "description": "Array of webhook configs" } }
                },
                "post": {
                    "tags": ["Webhooks"],
                    "summary": "Add a webhook",
                    "operationId": "addWebhook",
                    "requestBody": json_body("NewWebhook"),
                    "responses": {
                        "201": { "description": "Webhook stored" },
                        "400": { "description": "Invalid URL" },
                        "502": { "description": "Verification delivery failed" }
                    }
                }
            },
            "/v1/webhooks/test": {
                "post": {
                    "tags": ["Webhooks"],
                    "summary": "Send a test event to a URL without storing it",
                    "operationId": "testWebhook",
                    "requestBody": json_body("TestWebhook"),
                    "responses": {
                        "200": { "description": "Delivered" },
                        "400": { "description": "Invalid URL" },
                        "502": { "description": "Delivery failed" }
                    }
                }
            },
            "/v1/webhooks/{id}": {
                "get": {
                    "tags": ["Webhooks"],
                    "summary": "Get a webhook",
                    "operationId": "getWebhook",
                    "parameters": [id_param()],
                    "responses": {
                        "200": { "description": "Webhook config" },
                        "404": { "description": "Unknown id" }
                    }
                },
                "patch": {
                    "tags": ["Webhooks"],
                    "summary": "Update a webhook (settings are replaced, not merged)",
                    "operationId": "updateWebhook",
                    "parameters": [id_param()],
                    "requestBody": json_body("WebhookUpdate"),
                    "responses": {
                        "200": { "description": "Updated config" },
                        "400": { "description": "Invalid URL" },
                        "404": { "description": "Unknown id" }
                    }
                },
                "delete": {
                    "tags": ["Webhooks"],
                    "summary": "Remove a webhook",
                    "operationId": "removeWebhook",
                    "parameters": [id_param()],
                    "responses": {
                        "204": { "description": "Removed" },
                        "404": { "description": "Unknown id" }
                    }
                }
            },
            "/v1/webhooks/{id}/trigger": {
                "post": {
                    "tags": ["Webhooks"],
                    "summary": "Deliver an event to one webhook",
                    "operationId": "triggerWebhook",
                    "parameters": [id_param()],
                    "requestBody": json_body("WebhookPayload"),
                    "responses": {
                        "200": { "description": "Delivered" },
                        "404": { "description": "Unknown or inactive webhook" },
                        "422": { "description": "Webhook not subscribed to this event" },
                        "502": { "description": "Delivery failed after all retries" }
                    }
                }
            },
            "/v1/events": {
                "post": {
                    "tags": ["Webhooks"],
                    "summary": "Deliver an event to every subscribed, active webhook",
                    "operationId": "broadcastEvent",
                    "requestBody": json_body("WebhookPayload"),
                    "responses": { "200": { "description": "Per-webhook results" } }
                }
            },
            "/v1/templates": {
                "get": {
                    "tags": ["Templates"],
                    "summary": "Integration catalogue",
                    "operationId": "listTemplates",
                    "responses": { "200": { "description": "Array of templates" } }
                }
            },
            "/v1/templates/{type}": {
                "get": {
                    "tags": ["Templates"],
                    "summary": "One integration template",
                    "operationId": "getTemplate",
                    "parameters": [{
                        "name": "type",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string", "enum": type_names }
                    }],
                    "responses": {
                        "200": { "description": "Template" },
                        "404": { "description": "Unknown type" }
                    }
                }
            },
            "/metrics": {
                "get": {
                    "tags": ["System"],
                    "summary": "Prometheus metrics",
                    "operationId": "metrics",
                    "responses": {
                        "200": {
                            "description": "Prometheus-formatted metrics",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "WebhookSettings": {
                    "type": "object",
                    "additionalProperties": true,
                    "properties": {
                        "channel": { "type": "string" },
                        "username": { "type": "string" },
                        "customMessage": { "type": "string" },
                        "includeDetails": { "type": "boolean" },
                        "retryCount": { "type": "integer", "minimum": 0 },
                        "timeout": { "type": "integer", "description": "Milliseconds per attempt" }
                    }
                },
                "NewWebhook": {
                    "type": "object",
                    "required": ["name", "url"],
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string", "enum": type_names },
                        "url": { "type": "string", "format": "uri" },
                        "isActive": { "type": "boolean", "default": true },
                        "events": { "type": "array", "items": { "type": "string", "enum": event_names } },
                        "settings": { "$ref": "#/components/schemas/WebhookSettings" },
                        "verify": { "type": "boolean", "default": false }
                    }
                },
                "WebhookUpdate": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string", "enum": type_names },
                        "url": { "type": "string", "format": "uri" },
                        "isActive": { "type": "boolean" },
                        "events": { "type": "array", "items": { "type": "string", "enum": event_names } },
                        "settings": { "$ref": "#/components/schemas/WebhookSettings" }
                    }
                },
                "WebhookPayload": {
                    "type": "object",
                    "required": ["event", "timestamp", "user"],
                    "properties": {
                        "event": { "type": "string", "enum": event_names },
                        "timestamp": { "type": "string", "format": "date-time" },
                        "user": {
                            "type": "object",
                            "required": ["id", "name"],
                            "properties": {
                                "id": { "type": "string" },
                                "name": { "type": "string" }
                            }
                        },
                        "data": { "type": "object" }
                    }
                },
                "TestWebhook": {
                    "type": "object",
                    "required": ["url"],
                    "properties": {
                        "url": { "type": "string", "format": "uri" },
                        "type": { "type": "string", "enum": type_names }
                    }
                }
            }
        }
    });

    Json(spec).into_response()
}
