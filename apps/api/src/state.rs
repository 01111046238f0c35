use std::sync::Arc;

use crate::config::Config;
use crate::suggestion::suggester::ItemSuggester;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable suggestion backend. Default: LlmItemSuggester over the shared LlmClient.
    pub suggester: Arc<dyn ItemSuggester>,
}
