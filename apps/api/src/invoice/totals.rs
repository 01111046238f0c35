use serde::{Deserialize, Serialize};

use crate::invoice::models::Invoice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTotal {
    pub id: u32,
    pub total: f64,
}

/// Derived money figures for an invoice. Values are unrounded; rounding is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub line_totals: Vec<LineTotal>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// subtotal = Σ quantity × amount, tax = subtotal × rate / 100, total = subtotal + tax.
pub fn compute_totals(invoice: &Invoice) -> InvoiceTotals {
    let line_totals: Vec<LineTotal> = invoice
        .line_items
        .iter()
        .map(|item| LineTotal {
            id: item.id,
            total: item.line_total(),
        })
        .collect();

    let subtotal: f64 = line_totals.iter().map(|line| line.total).sum();
    let tax_amount = subtotal * (invoice.tax_rate / 100.0);

    InvoiceTotals {
        line_totals,
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}
