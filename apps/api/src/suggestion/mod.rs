// Line item suggestions: keywords in, up to three (description, amount) pairs out.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod handlers;
pub mod panel;
pub mod prompts;
pub mod suggester;
