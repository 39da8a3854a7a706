use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, WebhookError};

// ---------------------------------------------------------------------------
// Integration targets and events
// ---------------------------------------------------------------------------

/// Integration target a webhook posts to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebhookType {
    Slack,
    Discord,
    Telegram,
    Teams,
    Zapier,
    Make,
    Notion,
    Trello,
    Asana,
    N8n,
    Pabbly,
    GoogleChat,
    #[default]
    Generic,
}

impl WebhookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Discord => "discord",
            Self::Telegram => "telegram",
            Self::Teams => "teams",
            Self::Zapier => "zapier",
            Self::Make => "make",
            Self::Notion => "notion",
            Self::Trello => "trello",
            Self::Asana => "asana",
            Self::N8n => "n8n",
            Self::Pabbly => "pabbly",
            Self::GoogleChat => "google-chat",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for WebhookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain events the host application can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
    TaskCompleted,
    TaskCreated,
    TaskUpdated,
    GoalCompleted,
    DailySummary,
    WeeklyReport,
    ReminderTriggered,
}

impl WebhookEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCompleted => "task_completed",
            Self::TaskCreated => "task_created",
            Self::TaskUpdated => "task_updated",
            Self::GoalCompleted => "goal_completed",
            Self::DailySummary => "daily_summary",
            Self::WeeklyReport => "weekly_report",
            Self::ReminderTriggered => "reminder_triggered",
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Per-webhook settings. Keys we don't know about are kept in `extra`
/// so they survive a save/load cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_details: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
    /// Per-attempt timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookSettings {
    /// Fill every unset field from `defaults`. Values already present win.
    pub fn with_defaults(mut self, defaults: &WebhookSettings) -> Self {
        self.channel = self.channel.or_else(|| defaults.channel.clone());
        self.username = self.username.or_else(|| defaults.username.clone());
        self.custom_message = self
            .custom_message
            .or_else(|| defaults.custom_message.clone());
        self.include_details = self.include_details.or(defaults.include_details);
        self.retry_count = self.retry_count.or(defaults.retry_count);
        self.timeout = self.timeout.or(defaults.timeout);
        for (key, value) in &defaults.extra {
            self.extra.entry(key.clone()).or_insert_with(|| value.clone());
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Configurations
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WebhookType,
    pub url: String,
    pub is_active: bool,
    pub events: Vec<WebhookEvent>,
    #[serde(default)]
    pub settings: WebhookSettings,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<DateTime<Utc>>,
}

impl WebhookConfig {
    pub fn is_subscribed(&self, event: WebhookEvent) -> bool {
        self.events.contains(&event)
    }
}

fn default_true() -> bool {
    true
}

/// A configuration before the store assigns its id and creation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWebhook {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: WebhookType,
    pub url: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
    #[serde(default)]
    pub settings: WebhookSettings,
}

impl NewWebhook {
    pub fn new(name: impl Into<String>, kind: WebhookType, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            url: url.into(),
            is_active: true,
            events: Vec::new(),
            settings: WebhookSettings::default(),
        }
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = WebhookEvent>) -> Self {
        self.events = events.into_iter().collect();
        self
    }

    pub fn with_settings(mut self, settings: WebhookSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Partial update. `settings`, when present, replaces the stored settings
/// wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<WebhookType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<WebhookEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<WebhookSettings>,
}

impl WebhookUpdate {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub(crate) fn apply(self, config: &mut WebhookConfig) {
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(is_active) = self.is_active {
            config.is_active = is_active;
        }
        if let Some(events) = self.events {
            config.events = events;
        }
        if let Some(settings) = self.settings {
            config.settings = settings;
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads and results
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebhookUser {
    pub id: String,
    pub name: String,
}

/// Event body handed in by the caller. Never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: WebhookEvent,
    /// ISO-8601.
    pub timestamp: String,
    pub user: WebhookUser,
    #[serde(default)]
    pub data: Value,
}

impl WebhookPayload {
    pub fn new(event: WebhookEvent, user: WebhookUser, data: Value) -> Self {
        Self {
            event,
            timestamp: Utc::now().to_rfc3339(),
            user,
            data,
        }
    }
}

/// Uniform outcome of a delivery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    pub fn delivered(status_code: u16) -> Self {
        Self {
            success: true,
            status_code: Some(status_code),
            message: Some("Webhook başarıyla gönderildi".to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Accept only absolute `http`/`https` URLs.
pub fn validate_url(raw: &str) -> Result<()> {
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(WebhookError::InvalidUrl(format!(
            "{raw}: unsupported scheme {}",
            parsed.scheme()
        ))),
        Err(e) => Err(WebhookError::InvalidUrl(format!("{raw}: {e}"))),
    }
}
