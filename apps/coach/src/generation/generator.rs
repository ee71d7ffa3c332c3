//! Virtual project generation: turns a few keywords into a full internship
//! storyline.
//!
//! Flow: build prompt → LLM (structured) → validate shape → draft.
//! A missing key or a reply of the wrong shape yields the built-in sample;
//! transport and provider failures propagate so nothing half-done is kept.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{GENERATOR_PROMPT_TEMPLATE, GENERATOR_SYSTEM};
use crate::generation::sample::sample_project_data;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{Completion, LlmClient};
use crate::models::draft::Draft;
use crate::models::project::{ArtifactPayload, SavedArtifact};
use crate::models::settings::ProviderConfig;
use crate::models::virtual_project::GeneratedProjectData;

/// Progress recorded for a freshly saved project: generated, not yet rehearsed.
const SAVED_PROJECT_PROGRESS: u8 = 20;
const UNTITLED_PROJECT: &str = "Untitled project";
const GENERIC_ROLE: &str = "General role";

/// Form input for the generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub industry: String,
    pub role: String,
    pub project_type: String,
}

impl GenerateRequest {
    fn user_content(&self) -> String {
        fill_template(
            GENERATOR_PROMPT_TEMPLATE,
            &[
                ("industry", self.industry.trim()),
                ("role", self.role.trim()),
                ("project_type", self.project_type.trim()),
            ],
        )
    }
}

/// Runs the generator workflow.
pub async fn generate_project(
    llm: &LlmClient,
    config: &ProviderConfig,
    request: &GenerateRequest,
) -> Result<Draft<GeneratedProjectData>, AppError> {
    let system = format!("{GENERATOR_SYSTEM}\n\n{JSON_ONLY_INSTRUCTION}");
    info!(
        "Generating virtual project: industry={:?} role={:?}",
        request.industry, request.role
    );

    match llm.invoke(config, &system, &request.user_content(), true).await? {
        Completion::NoCredential => Ok(Draft::sample(sample_project_data())),
        Completion::Json(value) => match serde_json::from_value::<GeneratedProjectData>(value) {
            Ok(data) => {
                info!(
                    "Generated project with {} timeline phases",
                    data.timeline.len()
                );
                Ok(Draft::from_model(data))
            }
            Err(e) => {
                warn!("Generated project is missing required fields, using sample: {e}");
                Ok(Draft::sample(sample_project_data()))
            }
        },
        Completion::Text(_) => Err(AppError::Internal(anyhow::anyhow!(
            "structured call returned plain text"
        ))),
    }
}

/// Wraps a generated project into a saved artifact.
pub fn project_artifact(data: GeneratedProjectData, request: &GenerateRequest) -> SavedArtifact {
    SavedArtifact::new(
        non_empty_or(&request.project_type, UNTITLED_PROJECT),
        non_empty_or(&request.role, GENERIC_ROLE),
        SAVED_PROJECT_PROGRESS,
        ArtifactPayload::GeneratedProject(data),
    )
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::transport::testing::RecordingTransport;
    use crate::models::draft::Origin;
    use crate::models::project::ArtifactKind;
    use crate::models::settings::Provider;
    use serde_json::json;

    fn request() -> GenerateRequest {
        GenerateRequest {
            industry: "Retail".to_string(),
            role: "Data analyst".to_string(),
            project_type: "Churn dashboard".to_string(),
        }
    }

    fn keyed() -> ProviderConfig {
        ProviderConfig {
            api_key: "sk-test".to_string(),
            ..ProviderConfig::default()
        }
        .with_provider(Provider::OpenAi)
    }

    fn model_project() -> serde_json::Value {
        let mut value = serde_json::to_value(sample_project_data()).unwrap();
        value["background"]["target"] = json!("Build a churn early-warning dashboard");
        value
    }

    fn reply_with(content: &str) -> String {
        json!({"choices": [{"message": {"content": content}}]}).to_string()
    }

    #[test]
    fn test_user_content_lists_the_form_fields() {
        assert_eq!(
            request().user_content(),
            "Industry: Retail\nRole: Data analyst\nProject type: Churn dashboard"
        );
    }

    #[tokio::test]
    async fn test_without_key_returns_sample_and_makes_no_call() {
        let transport = Arc::new(RecordingTransport::default());
        let llm = LlmClient::with_transport(transport.clone());

        let draft = generate_project(&llm, &ProviderConfig::default(), &request())
            .await
            .unwrap();

        assert_eq!(draft.origin, Origin::Sample);
        assert_eq!(draft.payload, sample_project_data());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_model_project_is_used_when_well_formed() {
        let content = format!("```json\n{}\n```", model_project());
        let transport = Arc::new(RecordingTransport::replying(200, reply_with(&content)));
        let llm = LlmClient::with_transport(transport.clone());

        let draft = generate_project(&llm, &keyed(), &request()).await.unwrap();

        assert_eq!(draft.origin, Origin::Model);
        assert_eq!(
            draft.payload.background.target,
            "Build a churn early-warning dashboard"
        );
        let body = &transport.requests()[0].body;
        assert_eq!(body["messages"][1]["content"], request().user_content());
        assert!(body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("valid JSON only"));
    }

    #[tokio::test]
    async fn test_model_project_missing_fields_falls_back_to_sample() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            reply_with(r#"{"background": {"target": "half a project"}}"#),
        ));
        let llm = LlmClient::with_transport(transport);

        let draft = generate_project(&llm, &keyed(), &request()).await.unwrap();

        assert!(draft.is_sample());
        assert_eq!(draft.payload, sample_project_data());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let transport = Arc::new(RecordingTransport::replying(
            500,
            json!({"error": {"message": "overloaded"}}).to_string(),
        ));
        let llm = LlmClient::with_transport(transport);

        let err = generate_project(&llm, &keyed(), &request())
            .await
            .unwrap_err();
        assert_eq!(err.notice(), "API call failed: overloaded");
    }

    #[test]
    fn test_artifact_defaults_for_blank_form() {
        let artifact = project_artifact(sample_project_data(), &GenerateRequest::default());
        assert_eq!(artifact.title, UNTITLED_PROJECT);
        assert_eq!(artifact.target_role, GENERIC_ROLE);
        assert_eq!(artifact.progress, SAVED_PROJECT_PROGRESS);
        assert_eq!(artifact.kind(), ArtifactKind::GeneratedProject);
    }

    #[test]
    fn test_artifact_uses_form_values() {
        let artifact = project_artifact(sample_project_data(), &request());
        assert_eq!(artifact.title, "Churn dashboard");
        assert_eq!(artifact.target_role, "Data analyst");
        assert!(!artifact.is_sample);
    }
}
