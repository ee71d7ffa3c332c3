//! The HTTP seam under the provider adapter. Production goes through
//! `reqwest`; tests swap in a recording double.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::llm_client::LlmError;

/// A single JSON POST, fully described.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    /// Query parameters appended (and encoded) by the transport.
    pub query: Vec<(String, String)>,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer: Option<String>,
    pub body: Value,
}

/// Whatever came back, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, request: OutboundRequest) -> Result<HttpReply, LlmError>;
}

/// `reqwest`-backed transport. No timeout is configured: the call waits for
/// whatever the underlying connection decides.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: OutboundRequest) -> Result<HttpReply, LlmError> {
        let mut builder = self
            .client
            .post(&request.url)
            .header("content-type", "application/json")
            .json(&request.body);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        // The Gemini key travels in the query string; reqwest errors echo the
        // full URL, so it is dropped before the error goes anywhere.
        let response = builder.send().await.map_err(redact)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(redact)?;
        debug!("POST {} -> {} ({} bytes)", request.url, status, body.len());

        Ok(HttpReply { status, body })
    }
}

fn redact(e: reqwest::Error) -> LlmError {
    LlmError::Http(e.without_url())
}
