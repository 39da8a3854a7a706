use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{validate_url, NewWebhook, WebhookConfig, WebhookUpdate};

/// Key the configuration map is persisted under.
pub const STORE_KEY: &str = "echoday_webhooks";

// ---------------------------------------------------------------------------
// Key-value persistence
// ---------------------------------------------------------------------------

/// Durable blob storage the configuration store writes through.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside `dir`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)
    }
}

/// In-process storage; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store poisoned"))?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store poisoned"))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Configuration store
// ---------------------------------------------------------------------------

/// Authoritative id -> config map. Every mutation rewrites the whole map
/// to the backing [`KeyValueStore`] while the write lock is held.
pub struct ConfigStore {
    webhooks: RwLock<HashMap<String, WebhookConfig>>,
    backend: Box<dyn KeyValueStore>,
}

impl ConfigStore {
    /// Load whatever the backend holds. Missing or unreadable data means
    /// an empty store.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let webhooks = load_map(backend.as_ref());
        tracing::info!(count = webhooks.len(), "Loaded webhook configurations");
        Self {
            webhooks: RwLock::new(webhooks),
            backend,
        }
    }

    pub async fn add(&self, new: NewWebhook) -> Result<String> {
        validate_url(&new.url)?;

        let id = format!("webhook_{}", uuid::Uuid::new_v4().simple());
        let config = WebhookConfig {
            id: id.clone(),
            name: new.name,
            kind: new.kind,
            url: new.url,
            is_active: new.is_active,
            events: new.events,
            settings: new.settings,
            created_at: Utc::now(),
            last_triggered: None,
        };

        let mut webhooks = self.webhooks.write().await;
        webhooks.insert(id.clone(), config);
        self.persist(&webhooks);
        Ok(id)
    }

    pub async fn remove(&self, id: &str) -> bool {
        let mut webhooks = self.webhooks.write().await;
        let removed = webhooks.remove(id).is_some();
        if removed {
            self.persist(&webhooks);
        }
        removed
    }

    pub async fn update(&self, id: &str, update: WebhookUpdate) -> Result<bool> {
        if let Some(url) = &update.url {
            validate_url(url)?;
        }

        let mut webhooks = self.webhooks.write().await;
        let Some(config) = webhooks.get_mut(id) else {
            return Ok(false);
        };
        update.apply(config);
        self.persist(&webhooks);
        Ok(true)
    }

    /// Stamp a successful delivery. A config removed mid-flight is ignored.
    pub async fn mark_triggered(&self, id: &str, at: DateTime<Utc>) {
        let mut webhooks = self.webhooks.write().await;
        if let Some(config) = webhooks.get_mut(id) {
            config.last_triggered = Some(at);
            self.persist(&webhooks);
        }
    }

    pub async fn get(&self, id: &str) -> Option<WebhookConfig> {
        self.webhooks.read().await.get(id).cloned()
    }

    /// All configs, oldest first.
    pub async fn list(&self) -> Vec<WebhookConfig> {
        let mut all: Vec<_> = self.webhooks.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub async fn list_active(&self) -> Vec<WebhookConfig> {
        let mut active = self.list().await;
        active.retain(|w| w.is_active);
        active
    }

    pub async fn len(&self) -> usize {
        self.webhooks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn persist(&self, webhooks: &HashMap<String, WebhookConfig>) {
        let blob = match serde_json::to_string(webhooks) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!("Failed to serialize webhook configurations: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.save(STORE_KEY, &blob) {
            tracing::error!("Failed to persist webhook configurations: {e}");
        }
    }
}

fn load_map(backend: &dyn KeyValueStore) -> HashMap<String, WebhookConfig> {
    let blob = match backend.load(STORE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return HashMap::new(),
        Err(e) => {
            tracing::warn!("Could not read webhook configurations, starting empty: {e}");
            return HashMap::new();
        }
    };
    match serde_json::from_str(&blob) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!("Stored webhook configurations are corrupt, starting empty: {e}");
            HashMap::new()
        }
    }
}
