//! Printable invoice: a self-contained HTML page the browser prints to PDF.

use askama::Template;
use chrono::{Datelike, NaiveDate};

use crate::invoice::models::Invoice;
use crate::invoice::totals::compute_totals;

/// One table row, already formatted for display.
pub struct PrintableLine {
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub total: String,
}

/// View model for `templates/invoice/printable.html`. Askama escapes every field except the logo,
/// which only gets through `embeddable_logo`.
#[derive(Template)]
#[template(path = "invoice/printable.html")]
pub struct PrintableInvoice {
    pub logo: Option<String>,
    pub from_address: String,
    pub to_address: String,
    pub invoice_number: String,
    pub issue_date: String,
    pub due_date: String,
    pub lines: Vec<PrintableLine>,
    pub subtotal: String,
    pub tax_rate: String,
    pub tax_amount: String,
    pub total: String,
    pub notes: Option<String>,
}

impl PrintableInvoice {
    pub fn new(invoice: &Invoice) -> Self {
        let totals = compute_totals(invoice);
        PrintableInvoice {
            logo: invoice
                .logo
                .as_deref()
                .and_then(embeddable_logo)
                .map(str::to_string),
            from_address: invoice.from_address.clone(),
            to_address: invoice.to_address.clone(),
            invoice_number: invoice.invoice_number.clone(),
            issue_date: format_date(invoice.issue_date),
            due_date: format_date(invoice.due_date),
            lines: invoice
                .line_items
                .iter()
                .map(|item| PrintableLine {
                    description: item.description.clone(),
                    quantity: format_quantity(item.quantity),
                    price: format_money(item.amount),
                    total: format_money(item.line_total()),
                })
                .collect(),
            subtotal: format_money(totals.subtotal),
            tax_rate: format_quantity(invoice.tax_rate),
            tax_amount: format_money(totals.tax_amount),
            total: format_money(totals.total),
            notes: Some(invoice.notes.clone()).filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Accepts only `data:image/<type>;base64,<payload>` with a plain base64 payload,
/// so the value is safe to place in `src` unescaped.
fn embeddable_logo(logo: &str) -> Option<&str> {
    let rest = logo.strip_prefix("data:image/")?;
    let (mime_subtype, payload) = rest.split_once(";base64,")?;
    let subtype_ok = !mime_subtype.is_empty()
        && mime_subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'));
    let payload_ok = !payload.is_empty()
        && payload
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='));
    (subtype_ok && payload_ok).then_some(logo)
}

/// `$1500.00` style. No grouping or currency conversion.
pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${value:.2}")
    }
}

/// Long date with an ordinal day: "October 19th, 2026". Missing dates print as "Not set".
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{} {}{}, {}",
            date.format("%B"),
            date.day(),
            ordinal_suffix(date.day()),
            date.year()
        ),
        None => "Not set".to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Whole numbers print without decimals; anything else keeps its digits.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
