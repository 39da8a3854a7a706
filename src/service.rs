use chrono::Utc;
use futures::future::join_all;
use serde_json::json;

use crate::dispatch::{DeliveryOptions, Dispatcher};
use crate::error::{Result, WebhookError};
use crate::format::format_payload;
use crate::model::{
    validate_url, NewWebhook, WebhookConfig, WebhookEvent, WebhookPayload, WebhookResponse,
    WebhookSettings, WebhookType, WebhookUpdate, WebhookUser,
};
use crate::store::ConfigStore;
use crate::templates::{self, WebhookTemplate};

/// Public entry point: configuration management plus delivery.
///
/// Built once at startup and shared behind an `Arc`.
pub struct WebhookService {
    store: ConfigStore,
    dispatcher: Dispatcher,
}

impl WebhookService {
    pub fn new(store: ConfigStore, dispatcher: Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    pub async fn add_webhook(&self, new: NewWebhook) -> Result<String> {
        let name = new.name.clone();
        let id = self.store.add(new).await?;
        tracing::info!(webhook_id = %id, name = %name, "Webhook added");
        Ok(id)
    }

    pub async fn remove_webhook(&self, id: &str) -> bool {
        let removed = self.store.remove(id).await;
        if removed {
            tracing::info!(webhook_id = id, "Webhook removed");
        }
        removed
    }

    pub async fn update_webhook(&self, id: &str, update: WebhookUpdate) -> Result<bool> {
        self.store.update(id, update).await
    }

    /// Deliver `payload` to one configuration.
    ///
    /// Lookup and subscription problems are `Err`; a failed delivery is an
    /// `Ok` response with `success: false`.
    pub async fn trigger_webhook(&self, id: &str, payload: &WebhookPayload) -> Result<WebhookResponse> {
        let config = match self.store.get(id).await {
            Some(config) if config.is_active => config,
            Some(_) => {
                return Err(WebhookError::NotFoundOrInactive(format!(
                    "webhook is not active: {id}"
                )))
            }
            None => {
                return Err(WebhookError::NotFoundOrInactive(format!(
                    "webhook not found: {id}"
                )))
            }
        };

        if !config.is_subscribed(payload.event) {
            return Err(WebhookError::EventNotSubscribed {
                id: id.to_string(),
                event: payload.event,
            });
        }

        Ok(self.deliver(&config, payload).await)
    }

    /// Send a sample `task_completed` event to `url` without storing anything.
    pub async fn test_webhook(&self, url: &str, kind: WebhookType) -> Result<WebhookResponse> {
        validate_url(url)?;

        let payload = WebhookPayload::new(
            WebhookEvent::TaskCompleted,
            WebhookUser {
                id: "test".to_string(),
                name: "Test Kullanıcısı".to_string(),
            },
            json!({ "title": "Test Görevi", "description": "Bu bir test mesajıdır" }),
        );
        let body = format_payload(kind, &payload, &WebhookSettings::default());
        let options = DeliveryOptions {
            max_retries: 1,
            ..Default::default()
        };
        Ok(self.dispatcher.send(url, &body, options).await)
    }

    /// Deliver one event to every active configuration subscribed to it,
    /// concurrently.
    pub async fn broadcast(&self, payload: &WebhookPayload) -> Vec<(String, WebhookResponse)> {
        let targets: Vec<_> = self
            .store
            .list_active()
            .await
            .into_iter()
            .filter(|w| w.is_subscribed(payload.event))
            .collect();

        tracing::debug!(event = %payload.event, targets = targets.len(), "Broadcasting event");

        let deliveries = targets.iter().map(|config| async move {
            (config.id.clone(), self.deliver(config, payload).await)
        });
        join_all(deliveries).await
    }

    pub async fn list_webhooks(&self) -> Vec<WebhookConfig> {
        self.store.list().await
    }

    pub async fn list_active_webhooks(&self) -> Vec<WebhookConfig> {
        self.store.list_active().await
    }

    pub async fn get_webhook(&self, id: &str) -> Option<WebhookConfig> {
        self.store.get(id).await
    }

    pub fn list_templates(&self) -> &'static [WebhookTemplate] {
        templates::all()
    }

    pub async fn webhook_count(&self) -> usize {
        self.store.len().await
    }

    async fn deliver(&self, config: &WebhookConfig, payload: &WebhookPayload) -> WebhookResponse {
        let body = format_payload(config.kind, payload, &config.settings);
        let options = DeliveryOptions::from_settings(&config.settings);
        let response = self.dispatcher.send(&config.url, &body, options).await;
        if response.success {
            self.store.mark_triggered(&config.id, Utc::now()).await;
        }
        response
    }
}
