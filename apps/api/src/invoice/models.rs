use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between issue date and due date on a fresh draft.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u64 = 30;
pub const DEFAULT_TAX_RATE: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u32,
    pub quantity: f64,
    pub description: String,
    /// Unit price.
    pub amount: f64,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.amount
    }
}

/// Everything the invoice form holds. The browser owns this state and sends it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Logo as a `data:` URL, if one was uploaded.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub notes: String,
    /// Percent, e.g. `8.0` for 8%.
    #[serde(default)]
    pub tax_rate: f64,
}

impl Invoice {
    /// A pre-filled draft matching what the form shows on first load.
    pub fn draft(today: NaiveDate) -> Self {
        Invoice {
            logo: None,
            from_address: "Your Company\n123 Main St\nAnytown, USA 12345".to_string(),
            to_address: "Client Company\n456 Oak Ave\nOtherville, USA 54321".to_string(),
            invoice_number: "001".to_string(),
            issue_date: Some(today),
            due_date: today.checked_add_days(Days::new(DEFAULT_PAYMENT_TERMS_DAYS)),
            line_items: vec![
                LineItem {
                    id: 1,
                    quantity: 1.0,
                    description: "Web Design Services".to_string(),
                    amount: 1500.0,
                },
                LineItem {
                    id: 2,
                    quantity: 10.0,
                    description: "Hosting (12 months)".to_string(),
                    amount: 25.0,
                },
            ],
            notes: "Thank you for your business!".to_string(),
            tax_rate: DEFAULT_TAX_RATE,
        }
    }

    #[allow(dead_code)]
    pub fn line_item(&self, id: u32) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    pub fn line_item_mut(&mut self, id: u32) -> Option<&mut LineItem> {
        self.line_items.iter_mut().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_draft_due_date_is_thirty_days_out() {
        let invoice = Invoice::draft(date(2026, 12, 15));
        assert_eq!(invoice.issue_date, Some(date(2026, 12, 15)));
        assert_eq!(invoice.due_date, Some(date(2027, 1, 14)));
    }

    #[test]
    fn test_draft_defaults() {
        let invoice = Invoice::draft(date(2026, 10, 19));
        assert_eq!(invoice.invoice_number, "001");
        assert_eq!(invoice.tax_rate, 8.0);
        assert_eq!(invoice.line_items.len(), 2);
        assert_eq!(invoice.line_items[1].description, "Hosting (12 months)");
        assert!(invoice.logo.is_none());
    }

    #[test]
    fn test_sparse_json_fills_defaults() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"line_items": [{"id": 4, "quantity": 2, "description": "Audit", "amount": 75.5}]}"#,
        )
        .unwrap();
        assert_eq!(invoice.tax_rate, 0.0);
        assert!(invoice.issue_date.is_none());
        assert_eq!(invoice.line_item(4).unwrap().line_total(), 151.0);
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let invoice = Invoice::draft(date(2026, 10, 19));
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["issue_date"], "2026-10-19");
        assert_eq!(json["due_date"], "2026-11-18");
    }
}
