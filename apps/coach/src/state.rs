use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pending::ActionGates;
use crate::store::{ConfigStore, FileStorage, LocalStorage, ProjectStore, StorageError};

/// Shared application state, built once in `main` and passed to every
/// command handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<ConfigStore>,
    pub projects: Arc<ProjectStore>,
    pub llm: LlmClient,
    pub gates: ActionGates,
}

impl AppState {
    /// Loads both stores from `storage`.
    pub async fn load(storage: Arc<dyn LocalStorage>, llm: LlmClient) -> Result<Self, StorageError> {
        let settings = ConfigStore::load(Arc::clone(&storage)).await?;
        let projects = ProjectStore::load(storage).await?;
        Ok(Self {
            settings: Arc::new(settings),
            projects: Arc::new(projects),
            llm,
            gates: ActionGates::default(),
        })
    }

    /// File-backed state rooted at the configured data directory.
    pub async fn from_config(config: &Config, llm: LlmClient) -> Result<Self, StorageError> {
        let storage: Arc<dyn LocalStorage> = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::load(storage, llm).await
    }
}
