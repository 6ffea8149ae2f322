use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use quickbill_catalog::CatalogEntry;
use quickbill_core::{DomainError, DomainResult, Money};

/// One invoice row, derived from a catalog selection.
///
/// Fields are public: the editing surface mutates rows in place and accepts
/// the staleness window between an edit and the next recompute.
/// `line_total == quantity * unit_price` holds after any recompute step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub brand: String,
    pub reference_code: String,
    pub quantity: u32,
    /// Free text, may be blank.
    pub expiration: String,
    /// Free text, may be blank.
    pub condition: String,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A line as it arrives from the editing grid: every field is free text.
///
/// This is the coercion boundary. Quantity and unit price are parsed when a
/// draft batch replaces the stored lines; nothing beyond this boundary
/// carries unparsed numbers.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub brand: String,
    pub reference_code: String,
    pub quantity: String,
    pub expiration: String,
    pub condition: String,
    pub unit_price: String,
}

impl LineDraft {
    /// Loosely-typed copy of a stored line, for handing to an editor.
    pub fn from_line(line: &InvoiceLine) -> Self {
        Self {
            brand: line.brand.clone(),
            reference_code: line.reference_code.clone(),
            quantity: line.quantity.to_string(),
            expiration: line.expiration.clone(),
            condition: line.condition.clone(),
            unit_price: line.unit_price.to_string(),
        }
    }

    fn coerce(&self) -> DomainResult<InvoiceLine> {
        let quantity_text = self.quantity.trim();
        let quantity: u32 = quantity_text.parse().map_err(|_| {
            DomainError::data_format(format!("quantity {quantity_text:?} is not a whole number"))
        })?;
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let unit_price: Money = self.unit_price.parse()?;
        let line_total = unit_price.times(quantity)?;

        Ok(InvoiceLine {
            brand: self.brand.clone(),
            reference_code: self.reference_code.clone(),
            quantity,
            expiration: self.expiration.clone(),
            condition: self.condition.clone(),
            unit_price,
            line_total,
        })
    }
}

/// The invoice-in-progress: ordered line store plus header metadata.
///
/// Created empty at session start, owned exclusively by the session, dropped
/// at session end. Single writer, so there is nothing to lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    invoice_date: NaiveDate,
    tracking_number: String,
    lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn new(invoice_date: NaiveDate) -> Self {
        Self {
            invoice_date,
            tracking_number: String::new(),
            lines: Vec::new(),
        }
    }

    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.invoice_date = date;
    }

    pub fn tracking_number(&self) -> &str {
        &self.tracking_number
    }

    pub fn set_tracking_number(&mut self, tracking_number: impl Into<String>) {
        self.tracking_number = tracking_number.into();
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    /// Direct in-place edits. Totals may go stale until the next
    /// [`Invoice::recompute_totals`].
    pub fn lines_mut(&mut self) -> &mut [InvoiceLine] {
        &mut self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Loosely-typed copy of all lines, for a free-form editing pass.
    pub fn drafts(&self) -> Vec<LineDraft> {
        self.lines.iter().map(LineDraft::from_line).collect()
    }

    /// Append a line for a catalog selection.
    ///
    /// Duplicate reference codes are legitimate separate lines; nothing is
    /// deduplicated. Expiration and condition start blank.
    pub fn add_line(&mut self, entry: &CatalogEntry, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let line_total = entry.price.times(quantity)?;

        self.lines.push(InvoiceLine {
            brand: entry.brand.clone(),
            reference_code: entry.reference_code.clone(),
            quantity,
            expiration: String::new(),
            condition: String::new(),
            unit_price: entry.price,
            line_total,
        });
        Ok(())
    }

    /// Remove one line by position.
    pub fn remove_line(&mut self, index: usize) -> DomainResult<InvoiceLine> {
        if index >= self.lines.len() {
            return Err(DomainError::validation(format!(
                "no line at position {index} (invoice has {})",
                self.lines.len()
            )));
        }
        Ok(self.lines.remove(index))
    }

    /// Wholesale replacement after a free-form editing pass.
    ///
    /// Every draft is coerced before anything is applied: the first quantity
    /// or price that fails to parse rejects the entire batch and leaves the
    /// stored lines untouched.
    pub fn replace_all(&mut self, drafts: &[LineDraft]) -> DomainResult<()> {
        let mut lines = Vec::with_capacity(drafts.len());
        for (i, draft) in drafts.iter().enumerate() {
            let line = draft.coerce().map_err(|e| with_line_context(i, e))?;
            lines.push(line);
        }
        self.lines = lines;
        Ok(())
    }

    /// Reassign every `line_total` and return the grand total.
    ///
    /// Idempotent. All-or-nothing: if any line fails (zero quantity from a
    /// direct edit, arithmetic overflow), no line is modified.
    pub fn recompute_totals(&mut self) -> DomainResult<Money> {
        let mut totals = Vec::with_capacity(self.lines.len());
        let mut grand = Money::zero();

        for (i, line) in self.lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(with_line_context(
                    i,
                    DomainError::validation("quantity must be positive"),
                ));
            }
            let total = line
                .unit_price
                .times(line.quantity)
                .map_err(|e| with_line_context(i, e))?;
            grand = grand.checked_add(total)?;
            totals.push(total);
        }

        for (line, total) in self.lines.iter_mut().zip(totals) {
            line.line_total = total;
        }
        Ok(grand)
    }
}

/// Stateless grand total over a line sequence: sum of quantity × unit price.
///
/// An empty sequence sums to zero.
pub fn grand_total(lines: &[InvoiceLine]) -> DomainResult<Money> {
    lines.iter().try_fold(Money::zero(), |acc, line| {
        let total = line.unit_price.times(line.quantity)?;
        acc.checked_add(total)
    })
}

fn with_line_context(index: usize, err: DomainError) -> DomainError {
    let label = index + 1;
    match err {
        DomainError::Validation(msg) => DomainError::validation(format!("line {label}: {msg}")),
        DomainError::DataFormat(msg) => DomainError::data_format(format!("line {label}: {msg}")),
        other => other,
    }
}
