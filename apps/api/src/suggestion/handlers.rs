//! Axum route handler for line item suggestions.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestion::suggester::{suggest_items, SuggestResponse};

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub keywords: String,
}

/// POST /api/suggest
///
/// Returns up to three `{description, amount}` candidates for the given keywords.
/// Any provider or schema failure comes back as one generic error.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Suggestion requested");

    let suggestions = suggest_items(&request.keywords, state.suggester.as_ref())
        .await
        .map_err(|e| {
            warn!(%request_id, "Suggestion failed: {e}");
            AppError::from(e)
        })?;

    info!(%request_id, count = suggestions.len(), "Suggestion succeeded");
    Ok(Json(SuggestResponse { suggestions }))
}
