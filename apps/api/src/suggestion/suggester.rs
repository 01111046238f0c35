//! Suggester: turns free-text keywords into up to three priced line item candidates.
//!
//! `AppState` holds an `Arc<dyn ItemSuggester>`. The production backend is
//! `LlmItemSuggester`; route tests swap in a canned implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::suggestion::prompts::{render_suggest_prompt, suggest_system};

/// Most suggestions ever handed back to a caller.
pub const MAX_SUGGESTIONS: usize = 3;
/// Longest keyword string accepted, in characters (after trimming).
pub const MAX_KEYWORDS_CHARS: usize = 500;

/// A single candidate line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub description: String,
    pub amount: f64,
}

/// The JSON shape the model must return, and the shape of the HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("keywords cannot be empty")]
    EmptyKeywords,

    #[error("keywords must be at most 500 characters")]
    KeywordsTooLong,

    #[error("suggestion call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned no usable suggestions")]
    NoUsableSuggestions,
}

impl From<SuggestError> for AppError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::EmptyKeywords | SuggestError::KeywordsTooLong => {
                AppError::Validation(err.to_string())
            }
            SuggestError::Llm(_) | SuggestError::NoUsableSuggestions => {
                AppError::Llm(err.to_string())
            }
        }
    }
}

/// Backend that produces suggestions for keywords that already passed validation.
#[async_trait]
pub trait ItemSuggester: Send + Sync {
    async fn suggest(&self, keywords: &str) -> Result<Vec<Suggestion>, SuggestError>;
}

/// Validates keywords, then asks the backend for suggestions.
///
/// Blank input never reaches the backend.
pub async fn suggest_items(
    keywords: &str,
    suggester: &dyn ItemSuggester,
) -> Result<Vec<Suggestion>, SuggestError> {
    let keywords = validate_keywords(keywords)?;
    suggester.suggest(keywords).await
}

/// Trims keywords and enforces the non-empty and length limits.
pub fn validate_keywords(keywords: &str) -> Result<&str, SuggestError> {
    let trimmed = keywords.trim();
    if trimmed.is_empty() {
        return Err(SuggestError::EmptyKeywords);
    }
    if trimmed.chars().count() > MAX_KEYWORDS_CHARS {
        return Err(SuggestError::KeywordsTooLong);
    }
    Ok(trimmed)
}

/// Drops unusable entries, rounds amounts to cents and caps the list.
///
/// An entry is unusable when its description is blank or its amount is negative or not finite.
pub fn normalize_suggestions(raw: Vec<Suggestion>) -> Vec<Suggestion> {
    raw.into_iter()
        .filter_map(|s| {
            let description = s.description.trim();
            let amount = round_cents(s.amount);
            if description.is_empty() || !amount.is_finite() || amount < 0.0 {
                return None;
            }
            Some(Suggestion {
                description: description.to_string(),
                amount,
            })
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn round_cents(value: f64) -> f64 {
    // Past 1e15 an f64 has no fractional cents left, and scaling could overflow
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }
    let rounded = (value * 100.0).round() / 100.0;
    // Keep -0.0 out of responses
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmItemSuggester
// ────────────────────────────────────────────────────────────────────────────

/// Suggester backed by a single templated LLM call. No retries.
pub struct LlmItemSuggester {
    llm: LlmClient,
}

impl LlmItemSuggester {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ItemSuggester for LlmItemSuggester {
    async fn suggest(&self, keywords: &str) -> Result<Vec<Suggestion>, SuggestError> {
        let prompt = render_suggest_prompt(keywords);
        let response: SuggestResponse = self.llm.call_json(&prompt, &suggest_system()).await?;

        let returned = response.suggestions.len();
        let suggestions = normalize_suggestions(response.suggestions);
        debug!(
            "Model returned {returned} suggestions, {} usable",
            suggestions.len()
        );

        if suggestions.is_empty() {
            return Err(SuggestError::NoUsableSuggestions);
        }

        info!("Produced {} line item suggestions", suggestions.len());
        Ok(suggestions)
    }
}
