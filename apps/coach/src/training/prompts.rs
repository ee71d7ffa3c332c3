// LLM prompt constants for the mock interviewer.

/// Literal the interviewer embeds in a reply to mark it as a critique.
pub const CRITIQUE_MARKER: &str = r#"{"analysis": true}"#;

/// The same marker as models often emit it, without the space.
pub const CRITIQUE_MARKER_COMPACT: &str = r#"{"analysis":true}"#;

/// System instruction for every interview turn. Replies are plain text.
pub const INTERVIEWER_SYSTEM: &str = r#"You are a strict but professional interviewer. Dig into the candidate's project experience using the STAR method (Situation, Task, Action, Result). Keep it short and ask only one core question at a time. If the candidate's answer is weak, include the marker {"analysis": true} in your reply and give brief advice."#;

/// First interviewer line of every session.
pub const GREETING: &str = "Hello! I'm your AI interviewer. Based on the script above, \
    briefly introduce this experience.";

/// Interviewer line used when no API key is configured.
pub const OFFLINE_REPLY: &str =
    "(No API key configured) Sample feedback: your answer is logically clear. Please continue.";
