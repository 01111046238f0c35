//! Invoice editing: the form's line item and tax operations as a single reducer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::invoice::models::{Invoice, LineItem};
use crate::suggestion::suggester::Suggestion;

#[derive(Debug, Error, PartialEq)]
pub enum InvoiceError {
    #[error("line item {0} does not exist")]
    UnknownLineItem(u32),

    #[error("tax rate must be a finite number")]
    InvalidTaxRate,

    #[error("{0} must be a finite number")]
    NonFiniteValue(&'static str),
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::UnknownLineItem(_) => AppError::NotFound(err.to_string()),
            InvoiceError::InvalidTaxRate | InvoiceError::NonFiniteValue(_) => {
                AppError::Validation(err.to_string())
            }
        }
    }
}

/// One edit to an invoice, as sent by the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InvoiceEdit {
    AddLineItem,
    RemoveLineItem {
        id: u32,
    },
    UpdateLineItem {
        id: u32,
        #[serde(default)]
        quantity: Option<f64>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        amount: Option<f64>,
    },
    ApplySuggestion {
        id: u32,
        suggestion: Suggestion,
    },
    SetTaxRate {
        rate: f64,
    },
}

/// Applies an edit in place. A failed edit leaves the invoice untouched.
pub fn apply_edit(invoice: &mut Invoice, edit: InvoiceEdit) -> Result<(), InvoiceError> {
    match edit {
        InvoiceEdit::AddLineItem => {
            add_line_item(invoice);
            Ok(())
        }
        InvoiceEdit::RemoveLineItem { id } => {
            remove_line_item(invoice, id);
            Ok(())
        }
        InvoiceEdit::UpdateLineItem {
            id,
            quantity,
            description,
            amount,
        } => {
            ensure_finite("quantity", quantity)?;
            ensure_finite("amount", amount)?;
            let item = invoice
                .line_item_mut(id)
                .ok_or(InvoiceError::UnknownLineItem(id))?;
            if let Some(quantity) = quantity {
                item.quantity = quantity;
            }
            if let Some(description) = description {
                item.description = description;
            }
            if let Some(amount) = amount {
                item.amount = amount;
            }
            Ok(())
        }
        InvoiceEdit::ApplySuggestion { id, suggestion } => {
            apply_suggestion(invoice, id, &suggestion)
        }
        InvoiceEdit::SetTaxRate { rate } => {
            if !rate.is_finite() {
                return Err(InvoiceError::InvalidTaxRate);
            }
            invoice.tax_rate = rate;
            Ok(())
        }
    }
}

/// Appends a blank line item with id = max id + 1 (1 for an empty invoice) and returns the id.
pub fn add_line_item(invoice: &mut Invoice) -> u32 {
    let id = invoice
        .line_items
        .iter()
        .map(|item| item.id)
        .max()
        .map_or(1, |max| max + 1);
    invoice.line_items.push(LineItem {
        id,
        quantity: 1.0,
        description: String::new(),
        amount: 0.0,
    });
    id
}

/// Removes the line item with `id`. Unknown ids are ignored.
pub fn remove_line_item(invoice: &mut Invoice, id: u32) {
    invoice.line_items.retain(|item| item.id != id);
}

/// Copies a suggestion's description and amount onto a line item. Quantity is kept.
pub fn apply_suggestion(
    invoice: &mut Invoice,
    id: u32,
    suggestion: &Suggestion,
) -> Result<(), InvoiceError> {
    ensure_finite("amount", Some(suggestion.amount))?;
    let item = invoice
        .line_item_mut(id)
        .ok_or(InvoiceError::UnknownLineItem(id))?;
    item.description = suggestion.description.clone();
    item.amount = suggestion.amount;
    Ok(())
}

fn ensure_finite(field: &'static str, value: Option<f64>) -> Result<(), InvoiceError> {
    match value {
        Some(v) if !v.is_finite() => Err(InvoiceError::NonFiniteValue(field)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> Invoice {
        Invoice::draft(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_add_line_item_uses_max_id_plus_one() {
        let mut invoice = draft();
        remove_line_item(&mut invoice, 1);
        let id = add_line_item(&mut invoice);
        assert_eq!(id, 3);
        let added = invoice.line_item(3).unwrap();
        assert_eq!(added.quantity, 1.0);
        assert_eq!(added.amount, 0.0);
        assert!(added.description.is_empty());
    }

    #[test]
    fn test_add_line_item_on_empty_invoice_starts_at_one() {
        let mut invoice = draft();
        invoice.line_items.clear();
        assert_eq!(add_line_item(&mut invoice), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut invoice = draft();
        apply_edit(&mut invoice, InvoiceEdit::RemoveLineItem { id: 99 }).unwrap();
        assert_eq!(invoice.line_items.len(), 2);
    }

    #[test]
    fn test_update_line_item_partial_fields() {
        let mut invoice = draft();
        apply_edit(
            &mut invoice,
            InvoiceEdit::UpdateLineItem {
                id: 2,
                quantity: Some(12.0),
                description: None,
                amount: None,
            },
        )
        .unwrap();
        let item = invoice.line_item(2).unwrap();
        assert_eq!(item.quantity, 12.0);
        assert_eq!(item.description, "Hosting (12 months)");
        assert_eq!(item.amount, 25.0);
    }

    #[test]
    fn test_update_unknown_item_fails() {
        let mut invoice = draft();
        let before = invoice.clone();
        let err = apply_edit(
            &mut invoice,
            InvoiceEdit::UpdateLineItem {
                id: 7,
                quantity: None,
                description: Some("x".to_string()),
                amount: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, InvoiceError::UnknownLineItem(7));
        assert_eq!(invoice, before);
    }

    #[test]
    fn test_apply_suggestion_keeps_quantity() {
        let mut invoice = draft();
        let suggestion = Suggestion {
            description: "Managed hosting, 12 months".to_string(),
            amount: 29.99,
        };
        apply_edit(&mut invoice, InvoiceEdit::ApplySuggestion { id: 2, suggestion }).unwrap();
        let item = invoice.line_item(2).unwrap();
        assert_eq!(item.quantity, 10.0);
        assert_eq!(item.description, "Managed hosting, 12 months");
        assert_eq!(item.amount, 29.99);
    }

    #[test]
    fn test_set_tax_rate_rejects_non_finite() {
        let mut invoice = draft();
        assert_eq!(
            apply_edit(&mut invoice, InvoiceEdit::SetTaxRate { rate: f64::NAN }),
            Err(InvoiceError::InvalidTaxRate)
        );
        apply_edit(&mut invoice, InvoiceEdit::SetTaxRate { rate: 20.0 }).unwrap();
        assert_eq!(invoice.tax_rate, 20.0);
    }

    #[test]
    fn test_edit_json_shape() {
        let edit: InvoiceEdit =
            serde_json::from_str(r#"{"op": "update_line_item", "id": 1, "amount": 1800}"#)
                .unwrap();
        assert_eq!(
            edit,
            InvoiceEdit::UpdateLineItem {
                id: 1,
                quantity: None,
                description: None,
                amount: Some(1800.0),
            }
        );
        let edit: InvoiceEdit = serde_json::from_str(r#"{"op": "add_line_item"}"#).unwrap();
        assert_eq!(edit, InvoiceEdit::AddLineItem);
    }
}
