// Experience refiner.
// Implements: rewriting a real work description into three registers, sample
// fallback, and saving the chosen register as an artifact.
// All LLM calls go through llm_client.

pub mod prompts;
pub mod rewriter;
pub mod sample;
