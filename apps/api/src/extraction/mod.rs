// Skill extraction: the direct model backend and the upload endpoints in front of it.
// All LLM calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod prompts;
