use crate::models::narrative::{NarrativeStyle, NarrativeVariant};
use crate::models::project::{ArtifactPayload, SavedArtifact};
use crate::models::virtual_project::GeneratedProjectData;
use crate::refiner::rewriter::RewriteRequest;

/// Length of the "now rehearsing" line, in characters.
const HEADLINE_CHARS: usize = 30;
const RESULT_PROMPT: &str = "(add quantified results based on the rewrite)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    /// STAR script for a generated project, or the placeholder.
    Star,
    /// Talking points from a rewritten narrative.
    Rewrite,
}

impl ScriptMode {
    pub fn heading(self) -> &'static str {
        match self {
            ScriptMode::Star => "STAR script",
            ScriptMode::Rewrite => "Rewrite rehearsal",
        }
    }
}

/// Situation / Task / Action / Result talking points shown next to the
/// interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingScript {
    pub mode: ScriptMode,
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
}

impl Default for TrainingScript {
    fn default() -> Self {
        Self {
            mode: ScriptMode::Star,
            situation: "Generate content with `refine` or `generate`, then pass --project <id> \
                to fill in the background here."
                .to_string(),
            task: "Task goal...".to_string(),
            action: "Concrete actions...".to_string(),
            result: "Final result...".to_string(),
        }
    }
}

impl TrainingScript {
    /// Script for a narrative that was just rewritten.
    pub fn from_rewrite(request: &RewriteRequest, variant: &NarrativeVariant) -> Self {
        Self::rewrite(
            format!(
                "(from rewrite) {} - {}",
                request.company.trim(),
                request.role.trim()
            ),
            request.target_role.trim(),
            variant,
        )
    }

    pub fn from_project(data: &GeneratedProjectData) -> Self {
        let action = data
            .timeline
            .iter()
            .flat_map(|phase| phase.action_items.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            mode: ScriptMode::Star,
            situation: data.background.target.clone(),
            task: data.background.role_definition.clone(),
            action,
            result: data.background.business_value.clone(),
        }
    }

    /// Script for a saved artifact. `style` picks the variant of a saved
    /// narrative and is ignored for generated projects.
    pub fn from_artifact(artifact: &SavedArtifact, style: NarrativeStyle) -> Self {
        match &artifact.payload {
            ArtifactPayload::GeneratedProject(data) => Self::from_project(data),
            ArtifactPayload::RewrittenNarrative(narrative) => Self::rewrite(
                format!("(from rewrite) {}", artifact.title),
                &artifact.target_role,
                narrative.variant(style),
            ),
        }
    }

    fn rewrite(situation: String, target_role: &str, variant: &NarrativeVariant) -> Self {
        Self {
            mode: ScriptMode::Rewrite,
            situation,
            task: format!("Target role: {target_role}"),
            action: variant.plain_text(),
            result: RESULT_PROMPT.to_string(),
        }
    }

    pub fn lines(&self) -> [(&'static str, &str); 4] {
        [
            ("S", self.situation.as_str()),
            ("T", self.task.as_str()),
            ("A", self.action.as_str()),
            ("R", self.result.as_str()),
        ]
    }

    /// The first few characters of the situation, for a one-line header.
    pub fn headline(&self) -> String {
        let mut head: String = self.situation.chars().take(HEADLINE_CHARS).collect();
        head.push_str("...");
        head
    }

    /// Renders the script; with `masked` the answers are hidden for recall
    /// practice and only the letters remain.
    pub fn render(&self, masked: bool) -> String {
        self.lines()
            .iter()
            .map(|(key, value)| {
                if masked {
                    format!("{key}: {}", "*".repeat(value.chars().count().min(40)))
                } else {
                    format!("{key}: {value}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
