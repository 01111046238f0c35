//! Axum route handlers for the Invoice API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::invoice::editor::{apply_edit, InvoiceEdit};
use crate::invoice::logo::logo_data_url;
use crate::invoice::models::Invoice;
use crate::invoice::render::PrintableInvoice;
use crate::invoice::totals::{compute_totals, InvoiceTotals};
use crate::state::AppState;

/// Multipart field carrying the logo file.
const LOGO_FIELD: &str = "logo";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub invoice: Invoice,
    pub edit: InvoiceEdit,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub invoice: Invoice,
    pub totals: InvoiceTotals,
}

#[derive(Debug, Serialize)]
pub struct LogoResponse {
    pub data_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/invoices/draft
pub async fn handle_draft() -> Json<Invoice> {
    Json(Invoice::draft(chrono::Local::now().date_naive()))
}

/// POST /api/v1/invoices/totals
pub async fn handle_totals(Json(invoice): Json<Invoice>) -> Json<InvoiceTotals> {
    Json(compute_totals(&invoice))
}

/// POST /api/v1/invoices/edit
///
/// Applies one edit and returns the updated invoice with fresh totals.
pub async fn handle_edit(Json(request): Json<EditRequest>) -> Result<Json<EditResponse>, AppError> {
    let mut invoice = request.invoice;
    apply_edit(&mut invoice, request.edit)?;
    let totals = compute_totals(&invoice);
    Ok(Json(EditResponse { invoice, totals }))
}

/// POST /api/v1/invoices/print
///
/// Returns the printable HTML page; the browser's print dialog produces the PDF.
pub async fn handle_print(Json(invoice): Json<Invoice>) -> PrintableInvoice {
    PrintableInvoice::new(&invoice)
}

/// POST /api/v1/invoices/logo
///
/// Accepts a multipart upload with a `logo` image field and returns it as a data URL.
pub async fn handle_logo_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LogoResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(LOGO_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read logo upload: {e}")))?;

        let data_url = logo_data_url(&content_type, &bytes, state.config.max_logo_bytes)?;
        info!("Encoded {} byte logo ({content_type})", bytes.len());
        return Ok(Json(LogoResponse { data_url }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{LOGO_FIELD}' is required"
    )))
}
