use std::fmt;

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use crate::models::narrative::RewrittenNarrative;
use crate::models::virtual_project::GeneratedProjectData;

/// Creation timestamp in milliseconds, doubling as the artifact's identity.
pub type ArtifactId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    GeneratedProject,
    RewrittenNarrative,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::GeneratedProject => f.write_str("generated-project"),
            ArtifactKind::RewrittenNarrative => f.write_str("rewritten-narrative"),
        }
    }
}

/// The artifact body; the tag doubles as the artifact kind so a payload can
/// never disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum ArtifactPayload {
    GeneratedProject(GeneratedProjectData),
    RewrittenNarrative(RewrittenNarrative),
}

/// A user-approved result saved to the project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArtifact {
    pub id: ArtifactId,
    pub title: String,
    pub target_role: String,
    /// 0–100.
    pub progress: u8,
    pub created_date: String,
    #[serde(default)]
    pub is_sample: bool,
    pub payload: ArtifactPayload,
}

impl SavedArtifact {
    /// Stamps a new artifact with the current time as its id and today's date.
    pub fn new(
        title: impl Into<String>,
        target_role: impl Into<String>,
        progress: u8,
        payload: ArtifactPayload,
    ) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            title: title.into(),
            target_role: target_role.into(),
            progress: progress.min(100),
            created_date: Local::now().format("%Y-%m-%d").to_string(),
            is_sample: false,
            payload,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self.payload {
            ArtifactPayload::GeneratedProject(_) => ArtifactKind::GeneratedProject,
            ArtifactPayload::RewrittenNarrative(_) => ArtifactKind::RewrittenNarrative,
        }
    }
}
