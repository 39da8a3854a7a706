use serde_json::{json, Value};

use crate::model::{WebhookEvent, WebhookPayload, WebhookSettings, WebhookType};

const DEFAULT_USERNAME: &str = "EchoDay";
const SLACK_ICON: &str = ":white_check_mark:";
const DISCORD_AVATAR: &str = "https://echoday.app/icon.png";

/// Build the JSON body a target expects for `payload`.
///
/// Slack and Discord get a chat message; every other target receives the
/// payload unchanged.
pub fn format_payload(kind: WebhookType, payload: &WebhookPayload, settings: &WebhookSettings) -> Value {
    match kind {
        WebhookType::Slack => {
            let mut body = json!({
                "text": message_text(payload, settings),
                "username": username(settings),
                "icon_emoji": SLACK_ICON,
            });
            if let Some(channel) = &settings.channel {
                body["channel"] = json!(channel);
            }
            body
        }
        WebhookType::Discord => json!({
            "content": message_text(payload, settings),
            "username": username(settings),
            "avatar_url": DISCORD_AVATAR,
        }),
        _ => serde_json::to_value(payload).unwrap_or(Value::Null),
    }
}

fn username(settings: &WebhookSettings) -> &str {
    settings.username.as_deref().unwrap_or(DEFAULT_USERNAME)
}

fn message_text(payload: &WebhookPayload, settings: &WebhookSettings) -> String {
    match &settings.custom_message {
        Some(custom) => custom.clone(),
        None => default_message(payload),
    }
}

/// Human readable sentence for an event.
pub fn default_message(payload: &WebhookPayload) -> String {
    let user = &payload.user.name;
    match payload.event {
        WebhookEvent::TaskCompleted => {
            format!("✅ {user} görevi tamamladı: {}", text_field(&payload.data, "title"))
        }
        WebhookEvent::TaskCreated => {
            format!("📝 {user} yeni görev ekledi: {}", text_field(&payload.data, "title"))
        }
        WebhookEvent::GoalCompleted => format!("🎯 {user} hedefini tamamladı!"),
        WebhookEvent::DailySummary => format!(
            "📊 Günlük özet: {}/{} görev tamamlandı",
            count_field(&payload.data, "completed"),
            count_field(&payload.data, "total"),
        ),
        other => format!("🔔 EchoDay bildirimi: {other}"),
    }
}

// Strings render bare; numbers and the rest as JSON text.
fn text_field(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn count_field(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::Null) | None => "0".to_string(),
        Some(_) => text_field(data, key),
    }
}
