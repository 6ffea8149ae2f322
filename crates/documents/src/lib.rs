//! Document rendering: the finished invoice as a print-ready PDF and a
//! spreadsheet.
//!
//! Both formats are produced from one [`DocumentSheet`] snapshot, so they can
//! never disagree on rows or totals. Rendering formats whatever sequence it
//! is given; business rules live upstream in `quickbill-invoicing`.

pub mod pdf;
pub mod profile;
pub mod sheet;
pub mod xlsx;

use thiserror::Error;

use quickbill_core::DomainError;
use quickbill_invoicing::Invoice;

pub use profile::BusinessProfile;
pub use sheet::{COLUMN_TITLES, DisplayRow, DocumentSheet, TOTAL_ROW_LABEL};

/// Failure while producing a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Totals could not be refreshed before rendering.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("pdf rendering failed: {0}")]
    Pdf(String),

    #[error("spreadsheet rendering failed: {0}")]
    Spreadsheet(String),
}

/// Derived, immutable export snapshot. Built fresh on every export; never
/// fed back into the invoice.
#[derive(Debug, Clone)]
pub struct RenderedDocuments {
    pub pdf: Vec<u8>,
    pub spreadsheet: Vec<u8>,
}

/// Render the invoice in both output formats.
///
/// Totals are recomputed first, so an export can never carry numbers
/// stale relative to the edited lines.
pub fn render(
    invoice: &mut Invoice,
    profile: &BusinessProfile,
) -> Result<RenderedDocuments, RenderError> {
    let sheet = DocumentSheet::prepare(invoice)?;
    let pdf = pdf::render_pdf(&sheet, profile)?;
    let spreadsheet = xlsx::render_xlsx(&sheet, profile)?;
    Ok(RenderedDocuments { pdf, spreadsheet })
}
