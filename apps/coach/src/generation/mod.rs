// Virtual project generator.
// Implements: prompt building, the structured LLM call, shape validation with
// sample fallback, and wrapping a result into a saved artifact.
// All LLM calls go through llm_client; nothing here talks to a provider directly.

pub mod generator;
pub mod prompts;
pub mod sample;
