use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::settings::ProviderConfig;
use crate::store::{LocalStorage, StorageError, CONFIG_KEY};

/// Holds the active provider configuration. `save` is the only mutator and
/// always replaces the whole record.
pub struct ConfigStore {
    storage: Arc<dyn LocalStorage>,
    current: RwLock<ProviderConfig>,
}

impl ConfigStore {
    /// Reads the persisted record, or starts from the built-in default.
    /// An unreadable record is logged and replaced by the default.
    pub async fn load(storage: Arc<dyn LocalStorage>) -> Result<Self, StorageError> {
        let config = match storage.get(CONFIG_KEY).await? {
            Some(raw) => match serde_json::from_str::<ProviderConfig>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Stored configuration is unreadable, using defaults: {e}");
                    ProviderConfig::default()
                }
            },
            None => ProviderConfig::default(),
        };
        info!("Loaded provider configuration: {config:?}");

        Ok(Self {
            storage,
            current: RwLock::new(config),
        })
    }

    pub async fn current(&self) -> ProviderConfig {
        self.current.read().await.clone()
    }

    /// Persists `config` and makes it current. On a failed write the previous
    /// configuration stays current.
    pub async fn save(&self, config: ProviderConfig) -> Result<(), StorageError> {
        let mut current = self.current.write().await;
        let raw = serde_json::to_string_pretty(&config)?;
        self.storage.set(CONFIG_KEY, &raw).await?;
        info!("Saved provider configuration: {config:?}");
        *current = config;
        Ok(())
    }
}
