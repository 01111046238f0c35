#![allow(dead_code)]

//! Suggestion panel: the per-line-item "AI Suggestions" popover as a plain state model.
//!
//! Requests are not serialized: a second request may start while one is in flight,
//! and whichever response arrives last is what the panel shows.

use serde::Serialize;
use thiserror::Error;

use crate::invoice::editor::{apply_suggestion, InvoiceError};
use crate::invoice::models::Invoice;
use crate::suggestion::suggester::{validate_keywords, SuggestError, Suggestion};

/// User-facing toast raised by the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelNotice {
    pub title: &'static str,
    pub description: &'static str,
}

impl PanelNotice {
    pub const NO_KEYWORDS: PanelNotice = PanelNotice {
        title: "No keywords",
        description: "Please enter some keywords to get suggestions.",
    };

    pub const FAILED: PanelNotice = PanelNotice {
        title: "AI Error",
        description: "Failed to get suggestions. Please try again.",
    };

    pub fn for_error(err: &SuggestError) -> PanelNotice {
        match err {
            SuggestError::EmptyKeywords => Self::NO_KEYWORDS,
            _ => Self::FAILED,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("no line item has the suggestion panel open")]
    NotOpen,

    #[error("suggestion {0} does not exist")]
    NoSuchSuggestion(usize),

    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}

/// Ticket for a started request. Carries the keywords to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub id: u64,
    pub keywords: String,
}

#[derive(Debug, Default)]
pub struct SuggestionPanel {
    active_item: Option<u32>,
    keywords: String,
    suggestions: Vec<Suggestion>,
    outstanding: usize,
    next_request_id: u64,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_item(&self) -> Option<u32> {
        self.active_item
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_suggesting(&self) -> bool {
        self.outstanding > 0
    }

    /// Opens the panel on a line item. Opening another item moves the panel.
    pub fn open(&mut self, item_id: u32) {
        self.active_item = Some(item_id);
    }

    /// Closes the panel and clears keywords and suggestions.
    pub fn close(&mut self) {
        self.active_item = None;
        self.keywords.clear();
        self.suggestions.clear();
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    /// Starts a request for the current keywords.
    ///
    /// Blank keywords are refused without starting anything. Otherwise the visible
    /// suggestions are cleared and a ticket is returned, even if another request is
    /// still in flight.
    pub fn begin_request(&mut self) -> Result<PendingRequest, SuggestError> {
        let keywords = validate_keywords(&self.keywords)?.to_string();
        self.suggestions.clear();
        self.outstanding += 1;
        self.next_request_id += 1;
        Ok(PendingRequest {
            id: self.next_request_id,
            keywords,
        })
    }

    /// Id of the most recently started request, if any.
    pub fn latest_request_id(&self) -> Option<u64> {
        (self.next_request_id > 0).then_some(self.next_request_id)
    }

    /// Records a finished request. Responses are applied in the order they arrive,
    /// so a superseded response still replaces the list.
    ///
    /// Returns the toast to show when the request failed.
    pub fn finish_request(
        &mut self,
        request: PendingRequest,
        outcome: Result<Vec<Suggestion>, SuggestError>,
    ) -> Option<PanelNotice> {
        self.outstanding = self.outstanding.saturating_sub(1);
        if request.id < self.next_request_id {
            tracing::debug!(
                request_id = request.id,
                latest = self.next_request_id,
                keywords = %request.keywords,
                "Applying superseded suggestion response"
            );
        }
        match outcome {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                None
            }
            Err(err) => {
                tracing::warn!("Suggestion request failed: {err}");
                Some(PanelNotice::for_error(&err))
            }
        }
    }

    /// Applies suggestion `index` to the active line item and closes the panel.
    pub fn select(&mut self, index: usize, invoice: &mut Invoice) -> Result<(), PanelError> {
        let item_id = self.active_item.ok_or(PanelError::NotOpen)?;
        let suggestion = self
            .suggestions
            .get(index)
            .ok_or(PanelError::NoSuchSuggestion(index))?;
        apply_suggestion(invoice, item_id, suggestion)?;
        self.close();
        Ok(())
    }
}
