//! The display sequence: invoice lines plus one synthetic total row, as
//! render-ready text.

use serde::Serialize;

use quickbill_core::{DomainResult, Money};
use quickbill_invoicing::{Invoice, InvoiceLine};

/// Fixed column order shared by every output format.
pub const COLUMN_TITLES: [&str; 7] = [
    "Brand",
    "Ref #",
    "Qty",
    "Expiration",
    "Condition",
    "Price",
    "Total",
];

/// Label carried in the brand column of the synthetic total row.
pub const TOTAL_ROW_LABEL: &str = "Total Invoice";

/// One display row: the seven columns as text, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub brand: String,
    pub reference_code: String,
    pub quantity: String,
    pub expiration: String,
    pub condition: String,
    pub unit_price: String,
    pub total: String,
}

impl DisplayRow {
    fn from_line(line: &InvoiceLine) -> Self {
        Self {
            brand: line.brand.clone(),
            reference_code: line.reference_code.clone(),
            quantity: line.quantity.to_string(),
            expiration: line.expiration.clone(),
            condition: line.condition.clone(),
            unit_price: line.unit_price.to_string(),
            total: line.line_total.to_string(),
        }
    }

    /// The synthetic trailing row: label, blanks, grand total.
    fn total_row(grand_total: Money) -> Self {
        Self {
            brand: TOTAL_ROW_LABEL.to_string(),
            reference_code: String::new(),
            quantity: String::new(),
            expiration: String::new(),
            condition: String::new(),
            unit_price: String::new(),
            total: grand_total.to_string(),
        }
    }

    /// Cells in fixed column order.
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.brand,
            &self.reference_code,
            &self.quantity,
            &self.expiration,
            &self.condition,
            &self.unit_price,
            &self.total,
        ]
    }
}

/// Immutable snapshot handed to both renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSheet {
    /// Invoice date, already formatted for display.
    pub invoice_date: String,
    pub tracking_number: String,
    /// Lines in invoice order, then the synthetic total row.
    pub rows: Vec<DisplayRow>,
    pub grand_total: Money,
}

impl DocumentSheet {
    /// Build the display sequence for an invoice.
    ///
    /// Recomputes totals first, so a sheet can never carry numbers that are
    /// stale relative to the lines it displays.
    pub fn prepare(invoice: &mut Invoice) -> DomainResult<Self> {
        let grand_total = invoice.recompute_totals()?;

        let mut rows: Vec<DisplayRow> =
            invoice.lines().iter().map(DisplayRow::from_line).collect();
        rows.push(DisplayRow::total_row(grand_total));

        Ok(Self {
            invoice_date: invoice.invoice_date().format("%Y-%m-%d").to_string(),
            tracking_number: invoice.tracking_number().to_string(),
            rows,
            grand_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quickbill_invoicing::LineDraft;
    use rust_decimal_macros::dec;

    fn invoice_with(drafts: &[LineDraft]) -> Invoice {
        let mut invoice = Invoice::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        invoice.replace_all(drafts).unwrap();
        invoice
    }

    fn draft(brand: &str, quantity: &str, price: &str) -> LineDraft {
        LineDraft {
            brand: brand.to_string(),
            quantity: quantity.to_string(),
            unit_price: price.to_string(),
            ..LineDraft::default()
        }
    }

    #[test]
    fn sheet_appends_exactly_one_total_row() {
        let mut invoice = invoice_with(&[draft("Acme", "3", "10.00"), draft("Beta", "2", "5.00")]);
        let sheet = DocumentSheet::prepare(&mut invoice).unwrap();

        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[0].brand, "Acme");
        assert_eq!(sheet.rows[0].total, "30.00");

        let total_row = &sheet.rows[2];
        assert_eq!(total_row.brand, TOTAL_ROW_LABEL);
        assert_eq!(total_row.quantity, "");
        assert_eq!(total_row.unit_price, "");
        assert_eq!(total_row.total, "40.00");
        assert_eq!(sheet.grand_total, quickbill_core::Money::new(dec!(40.00)));
    }

    #[test]
    fn sheet_reflects_edits_made_since_last_recompute() {
        let mut invoice = invoice_with(&[draft("Acme", "3", "10.00")]);
        invoice.recompute_totals().unwrap();
        invoice.lines_mut()[0].quantity = 4;

        let sheet = DocumentSheet::prepare(&mut invoice).unwrap();
        assert_eq!(sheet.rows[0].total, "40.00");
        assert_eq!(sheet.rows[1].total, "40.00");
    }

    #[test]
    fn empty_invoice_yields_only_the_total_row() {
        let mut invoice = Invoice::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        let sheet = DocumentSheet::prepare(&mut invoice).unwrap();

        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].brand, TOTAL_ROW_LABEL);
        assert_eq!(sheet.rows[0].total, "0.00");
        assert_eq!(sheet.invoice_date, "2025-03-14");
    }

    #[test]
    fn grand_total_excludes_the_synthetic_row() {
        let mut invoice = invoice_with(&[draft("Acme", "3", "10.00"), draft("Beta", "2", "5.00")]);
        let sheet = DocumentSheet::prepare(&mut invoice).unwrap();

        let line_sum: rust_decimal::Decimal = sheet.rows[..sheet.rows.len() - 1]
            .iter()
            .map(|r| r.total.parse::<rust_decimal::Decimal>().unwrap())
            .sum();
        assert_eq!(line_sum, sheet.grand_total.amount());
    }
}
