// All LLM prompt constants for the suggestion module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Role half of the suggestion system prompt. Combined with `JSON_ONLY_SYSTEM` by `suggest_system`.
const SUGGEST_SYSTEM_ROLE: &str = "You are an invoice assistant that suggests descriptions \
    and amounts for invoice line items based on keywords.";

/// Suggestion prompt template. Replace `{keywords}` before sending.
pub const SUGGEST_PROMPT_TEMPLATE: &str = r#"Based on the following keywords, suggest three different descriptions and amounts for invoice items.

Return a JSON object with this EXACT schema (no extra fields):
{
  "suggestions": [
    {"description": "Logo design, three concepts and two revision rounds", "amount": 450.00}
  ]
}

Rules:
- Exactly three entries in "suggestions", each a distinct way to bill for the work.
- "description" is a short line item description a client would understand.
- "amount" is a plain non-negative number (no currency symbol, no thousands separator).
- Format the amount to 2 decimal places.

Keywords: {keywords}"#;

/// Full system prompt for suggestion calls.
pub fn suggest_system() -> String {
    format!("{SUGGEST_SYSTEM_ROLE} {JSON_ONLY_SYSTEM}")
}

/// Renders the suggestion prompt for the given (already validated) keywords.
pub fn render_suggest_prompt(keywords: &str) -> String {
    SUGGEST_PROMPT_TEMPLATE.replace("{keywords}", keywords)
}
