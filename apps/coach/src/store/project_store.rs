use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::generation::sample::sample_artifact;
use crate::models::project::{ArtifactId, SavedArtifact};
use crate::store::{LocalStorage, StorageError, PROJECTS_KEY};

/// The saved-artifact list, newest first.
///
/// There is no update-in-place: a changed artifact is added as a new entry.
/// Removal is permanent; callers must have the user's confirmation first.
pub struct ProjectStore {
    storage: Arc<dyn LocalStorage>,
    projects: RwLock<Vec<SavedArtifact>>,
}

impl ProjectStore {
    /// Reads the persisted list. A first run starts with the example project;
    /// an unreadable record is logged and replaced the same way.
    pub async fn load(storage: Arc<dyn LocalStorage>) -> Result<Self, StorageError> {
        let projects = match storage.get(PROJECTS_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<SavedArtifact>>(&raw) {
                Ok(projects) => projects,
                Err(e) => {
                    warn!("Stored project list is unreadable, starting over: {e}");
                    vec![sample_artifact()]
                }
            },
            None => vec![sample_artifact()],
        };
        info!("Loaded {} saved projects", projects.len());

        Ok(Self {
            storage,
            projects: RwLock::new(projects),
        })
    }

    /// The full list, newest first. Filtering is the caller's business.
    pub async fn list(&self) -> Vec<SavedArtifact> {
        self.projects.read().await.clone()
    }

    pub async fn get(&self, id: ArtifactId) -> Option<SavedArtifact> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Prepends `artifact` and persists. Returns the id it was stored under,
    /// which differs from the one passed in only if that id was taken.
    pub async fn add(&self, mut artifact: SavedArtifact) -> Result<ArtifactId, StorageError> {
        let mut projects = self.projects.write().await;
        if projects.iter().any(|p| p.id == artifact.id) {
            let next = projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            warn!("Artifact id {} already taken, using {next}", artifact.id);
            artifact.id = next;
        }
        let id = artifact.id;

        let mut updated = Vec::with_capacity(projects.len() + 1);
        updated.push(artifact);
        updated.extend(projects.iter().cloned());
        self.persist(&updated).await?;
        *projects = updated;

        info!("Saved project {id}");
        Ok(id)
    }

    /// Deletes the artifact with `id`. Returns whether anything was removed;
    /// removing an unknown id changes nothing.
    pub async fn remove(&self, id: ArtifactId) -> Result<bool, StorageError> {
        let mut projects = self.projects.write().await;
        if !projects.iter().any(|p| p.id == id) {
            return Ok(false);
        }

        let updated: Vec<SavedArtifact> = projects.iter().filter(|p| p.id != id).cloned().collect();
        self.persist(&updated).await?;
        *projects = updated;

        info!("Deleted project {id}");
        Ok(true)
    }

    async fn persist(&self, projects: &[SavedArtifact]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(projects)?;
        self.storage.set(PROJECTS_KEY, &raw).await
    }
}
