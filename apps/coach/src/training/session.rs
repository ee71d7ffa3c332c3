//! Mock-interview chat.
//!
//! There is no server-side conversation: every turn resends the whole
//! speaker-labelled transcript as the user content, in plain-text mode.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{Completion, LlmClient};
use crate::models::settings::ProviderConfig;
use crate::training::prompts::{
    CRITIQUE_MARKER, CRITIQUE_MARKER_COMPACT, GREETING, INTERVIEWER_SYSTEM, OFFLINE_REPLY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The interviewer.
    Assistant,
    /// The candidate.
    User,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Assistant => "Interviewer",
            Speaker::User => "Candidate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub text: String,
    /// The interviewer marked this turn as a critique of the previous answer.
    pub flagged: bool,
}

impl ChatEntry {
    fn interviewer(text: impl Into<String>, flagged: bool) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            flagged,
        }
    }

    fn candidate(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            flagged: false,
        }
    }
}

/// One rehearsal. The transcript is append-only and lives only as long as
/// the session; `reset` is the only way to discard it.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    transcript: Vec<ChatEntry>,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatEntry::interviewer(GREETING, false)],
        }
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    /// Drops every turn and starts again from the greeting.
    pub fn reset(&mut self) {
        info!("Interview reset after {} turns", self.transcript.len());
        self.transcript = vec![ChatEntry::interviewer(GREETING, false)];
    }

    /// The transcript as sent to the model, one `Speaker: text` line per turn.
    pub fn context(&self) -> String {
        self.transcript
            .iter()
            .map(|entry| format!("{}: {}", entry.speaker.label(), entry.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Records the candidate's answer, asks the interviewer, and records the
    /// reply. On failure the answer stays in the transcript and no reply is
    /// added, so the next turn resends it.
    pub async fn send(
        &mut self,
        llm: &LlmClient,
        config: &ProviderConfig,
        answer: &str,
    ) -> Result<&ChatEntry, AppError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AppError::Validation("Type an answer first.".to_string()));
        }
        self.transcript.push(ChatEntry::candidate(answer));

        let context = self.context();
        debug!("Interview turn with {} lines of context", self.transcript.len());

        let reply = match llm.invoke(config, INTERVIEWER_SYSTEM, &context, false).await? {
            Completion::NoCredential => ChatEntry::interviewer(OFFLINE_REPLY, true),
            Completion::Text(text) => {
                let (text, flagged) = strip_critique_marker(&text);
                ChatEntry::interviewer(text, flagged)
            }
            Completion::Json(_) => {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "plain-text call returned JSON"
                )))
            }
        };

        self.transcript.push(reply);
        Ok(&self.transcript[self.transcript.len() - 1])
    }
}

/// Removes every critique marker from `text`. Returns the trimmed text and
/// whether any marker was present.
pub fn strip_critique_marker(text: &str) -> (String, bool) {
    let flagged = text.contains(CRITIQUE_MARKER) || text.contains(CRITIQUE_MARKER_COMPACT);
    if !flagged {
        return (text.trim().to_string(), false);
    }
    let cleaned = text
        .replace(CRITIQUE_MARKER, "")
        .replace(CRITIQUE_MARKER_COMPACT, "");
    (cleaned.trim().to_string(), true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::transport::testing::RecordingTransport;
    use crate::models::settings::Provider;
    use serde_json::json;

    fn keyed(provider: Provider) -> ProviderConfig {
        ProviderConfig {
            api_key: "key".to_string(),
            ..ProviderConfig::default()
        }
        .with_provider(provider)
    }

    fn gemini_reply(text: &str) -> String {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
    }

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = InterviewSession::new();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].speaker, Speaker::Assistant);
        assert_eq!(session.transcript()[0].text, GREETING);
        assert!(!session.transcript()[0].flagged);
    }

    #[test]
    fn test_marker_is_stripped_and_flags() {
        assert_eq!(
            strip_critique_marker(r#"{"analysis": true} Quantify the result. "#),
            ("Quantify the result.".to_string(), true)
        );
        assert_eq!(
            strip_critique_marker(r#"Too vague.{"analysis":true}"#),
            ("Too vague.".to_string(), true)
        );
    }

    #[test]
    fn test_every_marker_occurrence_is_removed() {
        let (text, flagged) =
            strip_critique_marker(r#"{"analysis": true}Weak. {"analysis": true}"#);
        assert!(flagged);
        assert_eq!(text, "Weak.");
    }

    #[test]
    fn test_reply_without_marker_is_not_flagged() {
        assert_eq!(
            strip_critique_marker("What was the hardest part?"),
            ("What was the hardest part?".to_string(), false)
        );
    }

    #[tokio::test]
    async fn test_offline_turn_gets_flagged_sample_feedback() {
        let transport = Arc::new(RecordingTransport::default());
        let llm = LlmClient::with_transport(transport.clone());
        let mut session = InterviewSession::new();

        let reply = session
            .send(&llm, &ProviderConfig::default(), "I built a dashboard.")
            .await
            .unwrap()
            .clone();

        assert_eq!(reply.text, OFFLINE_REPLY);
        assert!(reply.flagged);
        assert_eq!(session.transcript().len(), 3);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_turn_resends_whole_transcript_in_plain_mode() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            gemini_reply("Which metric moved?"),
        ));
        transport.push_reply(200, gemini_reply(r#"{"analysis": true} Give a number."#));
        let llm = LlmClient::with_transport(transport.clone());
        let config = keyed(Provider::Gemini);
        let mut session = InterviewSession::new();

        session.send(&llm, &config, "I built a dashboard.").await.unwrap();
        let second = session
            .send(&llm, &config, "Sales went up.")
            .await
            .unwrap()
            .clone();

        assert!(second.flagged);
        assert_eq!(second.text, "Give a number.");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let sent = requests[1].body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(
            sent,
            format!(
                "Interviewer: {GREETING}\nCandidate: I built a dashboard.\n\
                 Interviewer: Which metric moved?\nCandidate: Sales went up."
            )
        );
        assert_eq!(
            requests[1].body["generationConfig"]["responseMimeType"],
            "text/plain"
        );
        assert_eq!(
            requests[1].body["systemInstruction"]["parts"][0]["text"],
            INTERVIEWER_SYSTEM
        );
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_the_answer_only() {
        let transport = Arc::new(RecordingTransport::failing("connection refused"));
        let llm = LlmClient::with_transport(transport);
        let mut session = InterviewSession::new();

        let err = session
            .send(&llm, &keyed(Provider::OpenAi), "My answer")
            .await
            .unwrap_err();

        assert!(err.is_llm());
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].speaker, Speaker::User);
    }

    #[tokio::test]
    async fn test_blank_answer_is_rejected_without_a_call() {
        let transport = Arc::new(RecordingTransport::default());
        let llm = LlmClient::with_transport(transport.clone());
        let mut session = InterviewSession::new();

        let err = session
            .send(&llm, &keyed(Provider::OpenAi), "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(session.transcript().len(), 1);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_reset_reseeds_greeting() {
        let llm = LlmClient::with_transport(Arc::new(RecordingTransport::default()));
        let mut session = InterviewSession::new();
        session
            .send(&llm, &ProviderConfig::default(), "Hi")
            .await
            .unwrap();

        session.reset();

        assert_eq!(session.transcript(), InterviewSession::new().transcript());
    }
}
