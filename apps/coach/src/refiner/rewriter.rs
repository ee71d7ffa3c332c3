//! Experience rewriting: one real work description in, three registers out.
//!
//! Flow: build prompt → LLM (structured) → typed narrative → draft.
//! Same fallback rules as the generator: no key or a reply of the wrong shape
//! gives the built-in sample, anything else that goes wrong propagates.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{Completion, LlmClient};
use crate::models::draft::Draft;
use crate::models::narrative::{NarrativeStyle, RewrittenNarrative};
use crate::models::project::{ArtifactPayload, SavedArtifact};
use crate::models::settings::ProviderConfig;
use crate::refiner::prompts::{REFINER_PROMPT_TEMPLATE, REFINER_SYSTEM};
use crate::refiner::sample::sample_narrative;

/// A rewritten narrative is ready to rehearse as soon as it is saved.
const SAVED_NARRATIVE_PROGRESS: u8 = 100;

/// Form input for the refiner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub company: String,
    pub role: String,
    pub target_role: String,
    pub description: String,
}

impl RewriteRequest {
    fn user_content(&self) -> String {
        fill_template(
            REFINER_PROMPT_TEMPLATE,
            &[
                ("company", self.company.trim()),
                ("role", self.role.trim()),
                ("target_role", self.target_role.trim()),
                ("description", self.description.trim()),
            ],
        )
    }

    /// The role the rewrite is aimed at, falling back to the current one.
    pub fn aimed_role(&self) -> &str {
        let target = self.target_role.trim();
        if target.is_empty() {
            self.role.trim()
        } else {
            target
        }
    }
}

/// Runs the refiner workflow.
pub async fn rewrite_experience(
    llm: &LlmClient,
    config: &ProviderConfig,
    request: &RewriteRequest,
) -> Result<Draft<RewrittenNarrative>, AppError> {
    let system = format!("{REFINER_SYSTEM}\n\n{JSON_ONLY_INSTRUCTION}");
    info!(
        "Rewriting experience: role={:?} target={:?}",
        request.role, request.target_role
    );

    match llm.invoke(config, &system, &request.user_content(), true).await? {
        Completion::NoCredential => Ok(Draft::sample(sample_narrative())),
        Completion::Json(value) => match serde_json::from_value::<RewrittenNarrative>(value) {
            Ok(narrative) => Ok(Draft::from_model(narrative)),
            Err(e) => {
                warn!("Rewritten narrative is missing required fields, using sample: {e}");
                Ok(Draft::sample(sample_narrative()))
            }
        },
        Completion::Text(_) => Err(AppError::Internal(anyhow::anyhow!(
            "structured call returned plain text"
        ))),
    }
}

/// Wraps a narrative into a saved artifact. All three variants are kept; the
/// chosen style only decides the title.
pub fn narrative_artifact(
    narrative: RewrittenNarrative,
    style: NarrativeStyle,
    request: &RewriteRequest,
) -> SavedArtifact {
    let title = format!(
        "{} - {} ({})",
        request.company.trim(),
        request.role.trim(),
        narrative.variant(style).title
    );
    let role = request.aimed_role().to_string();
    SavedArtifact::new(
        title,
        role,
        SAVED_NARRATIVE_PROGRESS,
        ArtifactPayload::RewrittenNarrative(narrative),
    )
}
