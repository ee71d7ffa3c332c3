//! Read-side projections over the saved project list. The store always
//! hands out the full list; filtering and counting happen here.

use clap::ValueEnum;

use crate::models::project::{ArtifactKind, SavedArtifact};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ArtifactFilter {
    #[default]
    All,
    /// Generated virtual projects only.
    Generated,
    /// Rewritten narratives only.
    Rewritten,
}

impl ArtifactFilter {
    pub fn matches(self, artifact: &SavedArtifact) -> bool {
        match self {
            ArtifactFilter::All => true,
            ArtifactFilter::Generated => artifact.kind() == ArtifactKind::GeneratedProject,
            ArtifactFilter::Rewritten => artifact.kind() == ArtifactKind::RewrittenNarrative,
        }
    }

    /// Keeps the list order, which is newest first.
    pub fn apply(self, artifacts: &[SavedArtifact]) -> Vec<&SavedArtifact> {
        artifacts.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Counts shown on the profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSummary {
    pub generated: usize,
    pub rewritten: usize,
    pub samples: usize,
}

impl ProfileSummary {
    pub fn from_artifacts(artifacts: &[SavedArtifact]) -> Self {
        artifacts
            .iter()
            .fold(ProfileSummary::default(), |mut summary, artifact| {
                match artifact.kind() {
                    ArtifactKind::GeneratedProject => summary.generated += 1,
                    ArtifactKind::RewrittenNarrative => summary.rewritten += 1,
                }
                if artifact.is_sample {
                    summary.samples += 1;
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.generated + self.rewritten
    }
}

/// One dashboard row: id, kind, title, role, date and progress.
pub fn list_row(artifact: &SavedArtifact) -> String {
    let kind = match artifact.kind() {
        ArtifactKind::GeneratedProject => "virtual",
        ArtifactKind::RewrittenNarrative => "refined",
    };
    let sample = if artifact.is_sample { " (example)" } else { "" };
    format!(
        "{:<14} [{kind}] {}{sample} · {} · {} · {}%",
        artifact.id, artifact.title, artifact.target_role, artifact.created_date, artifact.progress
    )
}
