use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::dispatch::{Dispatcher, Transport};
use crate::service::WebhookService;
use crate::store::{ConfigStore, KeyValueStore};

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct Metrics {
    pub attempts: AtomicU64,
    pub deliveries: AtomicU64,
    pub failures: AtomicU64,
}

impl Metrics {
    pub fn inc_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_delivered(&self) {
        self.deliveries.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_failed(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
    pub fn to_prometheus(&self, configs: usize) -> String {
        format!(
            "# HELP echoday_webhook_attempts_total Total HTTP delivery attempts\n\
             # TYPE echoday_webhook_attempts_total counter\n\
             echoday_webhook_attempts_total {}\n\
             # HELP echoday_webhook_deliveries_total Deliveries that got a 2xx reply\n\
             # TYPE echoday_webhook_deliveries_total counter\n\
             echoday_webhook_deliveries_total {}\n\
             # HELP echoday_webhook_failures_total Deliveries that exhausted their retries\n\
             # TYPE echoday_webhook_failures_total counter\n\
             echoday_webhook_failures_total {}\n\
             # HELP echoday_webhook_configs Configured webhooks\n\
             # TYPE echoday_webhook_configs gauge\n\
             echoday_webhook_configs {}\n",
            self.attempts.load(Ordering::Relaxed),
            self.deliveries.load(Ordering::Relaxed),
            self.failures.load(Ordering::Relaxed),
            configs,
        )
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WebhookService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire store, dispatcher and service together.
    pub fn new(backend: Box<dyn KeyValueStore>, transport: Arc<dyn Transport>) -> Self {
        let metrics = Arc::new(Metrics::default());
        let store = ConfigStore::open(backend);
        let dispatcher = Dispatcher::new(transport, metrics.clone());
        Self {
            service: Arc::new(WebhookService::new(store, dispatcher)),
            metrics,
        }
    }
}
