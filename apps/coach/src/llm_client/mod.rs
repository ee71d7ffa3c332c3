/// LLM Client: the single point of entry for every model call in the coach.
///
/// ARCHITECTURAL RULE: No other module may talk to a provider endpoint directly.
/// Workflows hand this client the active `ProviderConfig`, an instruction and
/// the user content; the client picks the wire shape, sends one request, and
/// decodes the reply. Nothing is cached, streamed or retried.
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::settings::{Provider, ProviderConfig};

pub mod decoder;
pub mod prompts;
pub mod providers;
pub mod transport;

use decoder::strip_json_fences;
use transport::{HttpTransport, ReqwestTransport};

/// Prompt sent by the connectivity check.
const PROBE_PROMPT: &str = "Hello";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with an error object; `message` is shown as-is.
    #[error("{message}")]
    Provider { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unreadable provider response: {0}")]
    MalformedEnvelope(serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM returned no valid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

impl LlmError {
    /// Decode failures share one generic message; everything else is passed
    /// through as the provider or transport reported it.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::EmptyContent | LlmError::InvalidJson(_) | LlmError::MalformedEnvelope(_) => {
                "No valid response was received from the model.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Outcome of a single `invoke`.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// No credential configured; no request was made. Callers switch to their
    /// built-in sample content.
    NoCredential,
    /// Structured mode: the fence-stripped reply parsed as JSON.
    Json(Value),
    /// Plain mode: the reply text exactly as received.
    Text(String),
}

/// Three-state result of the settings connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    InProgress,
    Succeeded,
    Failed(String),
}

/// The provider adapter used by all workflows.
#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn HttpTransport>,
}

impl LlmClient {
    pub fn new() -> Result<Self, LlmError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Sends one instruction + content pair to the configured provider.
    ///
    /// With `structured` set, the reply is fence-stripped and parsed as JSON;
    /// an empty reply or unparsable JSON fails the call. Without it the reply
    /// text is returned untouched.
    pub async fn invoke(
        &self,
        config: &ProviderConfig,
        system_instruction: &str,
        user_content: &str,
        structured: bool,
    ) -> Result<Completion, LlmError> {
        if !config.has_credential() {
            info!("No API key configured, skipping {} call", config.provider);
            return Ok(Completion::NoCredential);
        }

        debug!(
            "Invoking {} model {} (structured={})",
            config.provider, config.model, structured
        );
        let reply_text = match config.provider {
            Provider::Gemini => {
                let request = providers::gemini_request(
                    config,
                    system_instruction,
                    user_content,
                    Some(structured),
                );
                let reply = self.transport.post_json(request).await?;
                providers::gemini_reply_text(&reply)?
            }
            Provider::OpenAi => {
                let request =
                    providers::openai_request(config, system_instruction, user_content, structured);
                let reply = self.transport.post_json(request).await?;
                providers::openai_reply_text(&reply)?
            }
        };
        let text = reply_text
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        if !structured {
            return Ok(Completion::Text(text));
        }

        let cleaned = strip_json_fences(Some(&text)).unwrap_or_default();
        if cleaned.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        let value = serde_json::from_str(&cleaned).map_err(|e| {
            warn!("Model reply was not valid JSON after fence stripping: {e}");
            LlmError::InvalidJson(e)
        })?;

        Ok(Completion::Json(value))
    }

    /// Sends a minimal "Hello" through the configured provider to confirm the
    /// endpoint, model and credential work together. Never returns
    /// `InProgress`; that state belongs to the caller while this is awaited.
    pub async fn check_connection(&self, config: &ProviderConfig) -> ConnectionStatus {
        if !config.has_credential() {
            return ConnectionStatus::Failed("Enter an API key first.".to_string());
        }

        let result = match config.provider {
            Provider::Gemini => {
                let request = providers::gemini_request(config, "", PROBE_PROMPT, None);
                match self.transport.post_json(request).await {
                    Ok(reply) => providers::gemini_has_content(&reply),
                    Err(e) => Err(e),
                }
            }
            Provider::OpenAi => {
                let request = providers::openai_probe_request(config, PROBE_PROMPT);
                match self.transport.post_json(request).await {
                    Ok(reply) => providers::openai_has_choice(&reply),
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(true) => {
                info!("Connection check against {} succeeded", config.provider);
                ConnectionStatus::Succeeded
            }
            Ok(false) => ConnectionStatus::Failed(LlmError::EmptyContent.user_message()),
            Err(e) => {
                warn!("Connection check against {} failed: {e}", config.provider);
                ConnectionStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::transport::testing::RecordingTransport;
    use serde_json::json;

    fn client(transport: &Arc<RecordingTransport>) -> LlmClient {
        LlmClient::with_transport(transport.clone())
    }

    fn keyed(provider: Provider) -> ProviderConfig {
        ProviderConfig {
            api_key: "secret".to_string(),
            ..ProviderConfig::default()
        }
        .with_provider(provider)
    }

    fn openai_reply(content: &str) -> String {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
    }

    fn gemini_reply(text: &str) -> String {
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
            .to_string()
    }

    #[tokio::test]
    async fn test_empty_key_short_circuits_without_network() {
        let transport = Arc::new(RecordingTransport::default());
        let result = client(&transport)
            .invoke(&ProviderConfig::default(), "sys", "user", true)
            .await
            .unwrap();
        assert_eq!(result, Completion::NoCredential);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_openai_fenced_json_decodes_to_embedded_object() {
        let embedded = json!({
            "stable": {"title": "Standard", "content": [{"text": "Kept books", "type": "text"}]},
            "aggressive": {"title": "Growth", "content": []},
            "management": {"title": "Lead", "content": []}
        });
        let content = format!("```json\n{}\n```", embedded);
        let transport = Arc::new(RecordingTransport::replying(200, openai_reply(&content)));

        let result = client(&transport)
            .invoke(&keyed(Provider::OpenAi), "sys", "user", true)
            .await
            .unwrap();

        assert_eq!(result, Completion::Json(embedded));
        let Completion::Json(value) = result else {
            unreachable!()
        };
        assert!(!value.to_string().contains('`'));
    }

    #[tokio::test]
    async fn test_openai_request_goes_to_chat_completions_with_bearer() {
        let transport = Arc::new(RecordingTransport::replying(200, openai_reply("{}")));
        client(&transport)
            .invoke(&keyed(Provider::OpenAi), "sys", "user", true)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(requests[0].bearer.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_gemini_plain_text_is_returned_untouched() {
        let reply = "  Tell me more about the deadline.\n";
        let transport = Arc::new(RecordingTransport::replying(200, gemini_reply(reply)));

        let result = client(&transport)
            .invoke(&keyed(Provider::Gemini), "sys", "history", false)
            .await
            .unwrap();

        assert_eq!(result, Completion::Text(reply.to_string()));
        let requests = transport.requests();
        assert_eq!(requests[0].query[0], ("key".to_string(), "secret".to_string()));
        assert_eq!(
            requests[0].body["generationConfig"]["responseMimeType"],
            "text/plain"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_hard_failure() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            gemini_reply("```json\nnot json at all\n```"),
        ));
        let err = client(&transport)
            .invoke(&keyed(Provider::Gemini), "sys", "user", true)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidJson(_)));
        assert_eq!(
            err.user_message(),
            "No valid response was received from the model."
        );
    }

    #[tokio::test]
    async fn test_fence_only_reply_is_empty_content() {
        let transport = Arc::new(RecordingTransport::replying(200, openai_reply("```json\n```")));
        let err = client(&transport)
            .invoke(&keyed(Provider::OpenAi), "sys", "user", true)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_missing_candidates_is_empty_content() {
        let transport = Arc::new(RecordingTransport::replying(200, json!({}).to_string()));
        let err = client(&transport)
            .invoke(&keyed(Provider::Gemini), "sys", "user", false)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_provider_error_is_surfaced_verbatim() {
        let transport = Arc::new(RecordingTransport::replying(
            401,
            json!({"error": {"message": "Incorrect API key provided: sk-***"}}).to_string(),
        ));
        let err = client(&transport)
            .invoke(&keyed(Provider::OpenAi), "sys", "user", true)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Incorrect API key provided: sk-***");
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let transport = Arc::new(RecordingTransport::failing("connection refused"));
        let err = client(&transport)
            .invoke(&keyed(Provider::OpenAi), "sys", "user", true)
            .await
            .unwrap_err();
        assert!(err.user_message().contains("connection refused"));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_gemini_key_stays_out_of_transport_errors() {
        let key = "AIzaSECRET1234";
        // Nothing listens on port 1, so the request fails inside reqwest.
        let config = ProviderConfig {
            base_url: "http://127.0.0.1:1/v1beta/models".to_string(),
            api_key: key.to_string(),
            ..ProviderConfig::default().with_provider(Provider::Gemini)
        };
        let client = LlmClient::new().unwrap();

        let err = client.invoke(&config, "sys", "user", true).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        assert!(!err.to_string().contains(key));
        assert!(!err.user_message().contains(key));
        assert!(!crate::errors::AppError::from(err).notice().contains(key));

        let ConnectionStatus::Failed(message) = client.check_connection(&config).await else {
            panic!("connection check against a closed port succeeded");
        };
        assert!(!message.contains(key));
    }

    #[tokio::test]
    async fn test_connection_check_without_key_fails_locally() {
        let transport = Arc::new(RecordingTransport::default());
        let status = client(&transport)
            .check_connection(&ProviderConfig::default())
            .await;
        assert!(matches!(status, ConnectionStatus::Failed(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_connection_check_succeeds_on_gemini_content() {
        let transport = Arc::new(RecordingTransport::replying(200, gemini_reply("Hi!")));
        let status = client(&transport)
            .check_connection(&keyed(Provider::Gemini))
            .await;
        assert_eq!(status, ConnectionStatus::Succeeded);
        let body = &transport.requests()[0].body;
        assert!(body.get("systemInstruction").is_none());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
    }

    #[tokio::test]
    async fn test_connection_check_reports_provider_message() {
        let transport = Arc::new(RecordingTransport::replying(
            404,
            json!({"error": {"message": "The model `gpt-9` does not exist"}}).to_string(),
        ));
        let status = client(&transport)
            .check_connection(&keyed(Provider::OpenAi))
            .await;
        assert_eq!(
            status,
            ConnectionStatus::Failed("The model `gpt-9` does not exist".to_string())
        );
    }

    #[tokio::test]
    async fn test_connection_check_without_choices_fails() {
        let transport = Arc::new(RecordingTransport::replying(200, json!({"choices": []}).to_string()));
        let status = client(&transport)
            .check_connection(&keyed(Provider::OpenAi))
            .await;
        assert!(matches!(status, ConnectionStatus::Failed(_)));
    }
}
