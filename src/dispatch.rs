use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{WebhookResponse, WebhookSettings};
use crate::state::Metrics;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Pause before retry `n` is `n * BACKOFF_STEP`.
pub const BACKOFF_STEP: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Status line of an HTTP reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub reason: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST. `Err` carries a network-level failure message.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportReply, String>;
}

/// reqwest-backed transport.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportReply, String> {
        let body = serde_json::to_vec(body).map_err(|e| e.to_string())?;
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status();
        Ok(TransportReply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryOptions {
    /// Per attempt.
    pub timeout: Duration,
    /// Total attempts, including the first.
    pub max_retries: u32,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl DeliveryOptions {
    /// Absent or zero values fall back to the defaults.
    pub fn from_settings(settings: &WebhookSettings) -> Self {
        let defaults = Self::default();
        Self {
            timeout: settings
                .timeout
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            max_retries: settings
                .retry_count
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_retries),
        }
    }
}

/// Delivers formatted payloads with a per-attempt timeout and linear
/// backoff between attempts.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    metrics: Arc<Metrics>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, metrics: Arc<Metrics>) -> Self {
        Self { transport, metrics }
    }

    pub async fn send(&self, url: &str, body: &Value, options: DeliveryOptions) -> WebhookResponse {
        let max = options.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max {
            self.metrics.inc_attempt();
            let start = std::time::Instant::now();

            match self.attempt(url, body, options.timeout).await {
                Ok(status) => {
                    self.metrics.inc_delivered();
                    tracing::info!(
                        url,
                        attempt,
                        status,
                        latency_ms = start.elapsed().as_millis() as u64,
                        "Webhook delivered"
                    );
                    return WebhookResponse::delivered(status);
                }
                Err(e) => {
                    tracing::warn!(url, attempt, max, error = %e, "Webhook delivery failed");
                    last_error = e;
                }
            }

            if attempt < max {
                tokio::time::sleep(BACKOFF_STEP * attempt).await;
            }
        }

        self.metrics.inc_failed();
        WebhookResponse::failed(last_error)
    }

    async fn attempt(&self, url: &str, body: &Value, timeout: Duration) -> Result<u16, String> {
        match tokio::time::timeout(timeout, self.transport.post_json(url, body)).await {
            Ok(Ok(reply)) if reply.is_success() => Ok(reply.status),
            Ok(Ok(reply)) => Err(format!("HTTP {}: {}", reply.status, reply.reason)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(format!("request timed out after {}ms", timeout.as_millis())),
        }
    }
}
