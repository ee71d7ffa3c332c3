//! Wire shapes for the two supported backends.

use serde::{Deserialize, Serialize};

use crate::llm_client::transport::{HttpReply, OutboundRequest};
use crate::llm_client::LlmError;
use crate::models::settings::ProviderConfig;

const OPENAI_TEMPERATURE: f32 = 0.7;

// ────────────────────────────────────────────────────────────────────────────
// Gemini-style generateContent
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiInstruction<'a> {
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiReplyContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

/// `POST {base}/{model}:generateContent?key={apiKey}`.
///
/// `generation_config` is omitted when `structured` is `None`, which is what
/// the connectivity probe sends. An empty system instruction is omitted too.
pub fn gemini_request(
    config: &ProviderConfig,
    system_instruction: &str,
    user_content: &str,
    structured: Option<bool>,
) -> OutboundRequest {
    let body = GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts: vec![GeminiTextPart { text: user_content }],
        }],
        system_instruction: (!system_instruction.is_empty()).then(|| GeminiInstruction {
            parts: vec![GeminiTextPart {
                text: system_instruction,
            }],
        }),
        generation_config: structured.map(|json_mode| GeminiGenerationConfig {
            response_mime_type: if json_mode {
                "application/json"
            } else {
                "text/plain"
            },
        }),
    };

    OutboundRequest {
        url: format!("{}/{}:generateContent", trim_base(&config.base_url), config.model),
        query: vec![("key".to_string(), config.api_key.clone())],
        bearer: None,
        body: serde_json::to_value(body).unwrap_or_default(),
    }
}

/// Text of the first candidate's first part, if any.
pub fn gemini_reply_text(reply: &HttpReply) -> Result<Option<String>, LlmError> {
    let parsed: GeminiResponse = parse_envelope(reply)?;
    Ok(parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text))
}

/// True when the first candidate carries any content at all.
pub fn gemini_has_content(reply: &HttpReply) -> Result<bool, LlmError> {
    let parsed: GeminiResponse = parse_envelope(reply)?;
    Ok(parsed
        .candidates
        .first()
        .is_some_and(|c| c.content.is_some()))
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible chat/completions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// `POST {base}/chat/completions` with a system and a user message.
pub fn openai_request(
    config: &ProviderConfig,
    system_instruction: &str,
    user_content: &str,
    structured: bool,
) -> OutboundRequest {
    let body = ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_instruction,
            },
            ChatMessage {
                role: "user",
                content: user_content,
            },
        ],
        temperature: Some(OPENAI_TEMPERATURE),
        max_tokens: None,
        response_format: structured.then_some(ResponseFormat {
            format_type: "json_object",
        }),
    };
    openai_outbound(config, body)
}

/// The connectivity probe: one user message, five tokens.
pub fn openai_probe_request(config: &ProviderConfig, user_content: &str) -> OutboundRequest {
    let body = ChatRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: "user",
            content: user_content,
        }],
        temperature: None,
        max_tokens: Some(5),
        response_format: None,
    };
    openai_outbound(config, body)
}

fn openai_outbound(config: &ProviderConfig, body: ChatRequest<'_>) -> OutboundRequest {
    OutboundRequest {
        url: format!("{}/chat/completions", trim_base(&config.base_url)),
        query: Vec::new(),
        bearer: Some(config.api_key.clone()),
        body: serde_json::to_value(body).unwrap_or_default(),
    }
}

/// Content of the first choice's message, if any.
pub fn openai_reply_text(reply: &HttpReply) -> Result<Option<String>, LlmError> {
    let parsed: ChatResponse = parse_envelope(reply)?;
    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content))
}

pub fn openai_has_choice(reply: &HttpReply) -> Result<bool, LlmError> {
    let parsed: ChatResponse = parse_envelope(reply)?;
    Ok(!parsed.choices.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Shared envelope handling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl ProviderErrorBody {
    fn into_message(self) -> String {
        match self.message {
            Some(message) if !message.is_empty() => message,
            _ => serde_json::Value::Object(self.rest).to_string(),
        }
    }
}

trait HasProviderError {
    fn take_error(&mut self) -> Option<ProviderErrorBody>;
}

impl HasProviderError for GeminiResponse {
    fn take_error(&mut self) -> Option<ProviderErrorBody> {
        self.error.take()
    }
}

impl HasProviderError for ChatResponse {
    fn take_error(&mut self) -> Option<ProviderErrorBody> {
        self.error.take()
    }
}

/// Decodes a reply body, turning an `{"error": {...}}` payload into
/// `LlmError::Provider` regardless of status, and any other non-2xx reply into
/// `LlmError::Api`.
fn parse_envelope<T>(reply: &HttpReply) -> Result<T, LlmError>
where
    T: for<'de> Deserialize<'de> + HasProviderError,
{
    match serde_json::from_str::<T>(&reply.body) {
        Ok(mut parsed) => {
            if let Some(error) = parsed.take_error() {
                return Err(LlmError::Provider {
                    message: error.into_message(),
                });
            }
            if !reply.is_success() {
                return Err(LlmError::Api {
                    status: reply.status,
                    message: reply.body.clone(),
                });
            }
            Ok(parsed)
        }
        Err(_) if !reply.is_success() => Err(LlmError::Api {
            status: reply.status,
            message: reply.body.clone(),
        }),
        Err(e) => Err(LlmError::MalformedEnvelope(e)),
    }
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}
