pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::invoice::handlers as invoice;
use crate::state::AppState;
use crate::suggestion::handlers as suggestion;

/// Room for multipart boundaries and part headers on top of the logo bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let logo_body_limit = state.config.max_logo_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Suggestions
        .route("/api/suggest", post(suggestion::handle_suggest))
        // Invoice API
        .route("/api/v1/invoices/draft", get(invoice::handle_draft))
        .route("/api/v1/invoices/totals", post(invoice::handle_totals))
        .route("/api/v1/invoices/edit", post(invoice::handle_edit))
        .route("/api/v1/invoices/print", post(invoice::handle_print))
        .route(
            "/api/v1/invoices/logo",
            post(invoice::handle_logo_upload).layer(DefaultBodyLimit::max(logo_body_limit)),
        )
        .with_state(state)
}
