// Interview rehearsal.
// Implements: the STAR script shown before a session, and the mock-interviewer
// chat loop with critique flagging.

pub mod prompts;
pub mod script;
pub mod session;
