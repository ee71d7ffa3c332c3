//! Client-local persistence. Each record is one JSON document under a fixed
//! key; the two stores built on top keep an in-memory copy and write through
//! on every mutation.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

pub mod config_store;
pub mod project_store;

pub use config_store::ConfigStore;
pub use project_store::ProjectStore;

pub const CONFIG_KEY: &str = "coach_config";
pub const PROJECTS_KEY: &str = "coach_projects";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value storage for whole JSON records.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per record inside a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl LocalStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        let target = self.path_for(key);
        // Write-then-rename keeps the previous record intact if we die mid-write.
        let staging = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&staging, value).await?;
        fs::rename(&staging, &target).await?;
        debug!("Wrote {} ({} bytes)", target.display(), value.len());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_record_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.get(CONFIG_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        storage.set(PROJECTS_KEY, "[]").await.unwrap();
        assert_eq!(storage.get(PROJECTS_KEY).await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/coach_projects.json").exists());
        assert!(!dir.path().join("nested/coach_projects.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set(CONFIG_KEY, "{\"a\":1}").await.unwrap();
        storage.set(CONFIG_KEY, "{\"a\":2}").await.unwrap();
        assert_eq!(
            storage.get(CONFIG_KEY).await.unwrap().as_deref(),
            Some("{\"a\":2}")
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set(CONFIG_KEY, "{}").await.unwrap();
        assert!(storage.get(PROJECTS_KEY).await.unwrap().is_none());
    }
}
