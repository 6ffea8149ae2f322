//! The session context: one invoice-in-progress over a shared catalog.
//!
//! Session state is explicit (no globals), so isolated sessions can run side
//! by side in tests. The catalog is shared read-only; the invoice is owned
//! exclusively by its session for the session's lifetime.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use quickbill_catalog::{Catalog, CatalogEntry, CatalogQuery};
use quickbill_core::{DomainResult, Money, SessionId};
use quickbill_documents::{BusinessProfile, RenderError};
use quickbill_invoicing::{Invoice, LineDraft, grand_total};

use crate::export::ExportBundle;

pub struct Session {
    id: SessionId,
    catalog: Arc<Catalog>,
    profile: BusinessProfile,
    invoice: Invoice,
}

impl Session {
    /// Start a session with an empty invoice dated `invoice_date`.
    pub fn new(catalog: Arc<Catalog>, profile: BusinessProfile, invoice_date: NaiveDate) -> Self {
        let id = SessionId::new();
        debug!(session = %id, catalog_entries = catalog.len(), "session started");
        Self {
            id,
            catalog,
            profile,
            invoice: Invoice::new(invoice_date),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Filter the catalog. An empty result is a valid outcome.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        self.catalog.filter(query)
    }

    /// Add a catalog selection to the invoice; quantity defaults to 1.
    pub fn add(&mut self, entry: &CatalogEntry, quantity: Option<u32>) -> DomainResult<()> {
        let quantity = quantity.unwrap_or(1);
        self.invoice.add_line(entry, quantity)?;
        info!(
            session = %self.id,
            brand = %entry.brand,
            reference = %entry.reference_code,
            quantity,
            "line added"
        );
        Ok(())
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Direct access for in-place edits (date, tracking number, row fields).
    pub fn invoice_mut(&mut self) -> &mut Invoice {
        &mut self.invoice
    }

    /// Apply a free-form editing pass; rejected batches change nothing.
    pub fn replace_lines(&mut self, drafts: &[LineDraft]) -> DomainResult<()> {
        self.invoice.replace_all(drafts)?;
        info!(session = %self.id, lines = self.invoice.len(), "lines replaced");
        Ok(())
    }

    /// Grand total of the current lines as last computed.
    ///
    /// May lag direct edits until the next recompute or export.
    pub fn grand_total(&self) -> DomainResult<Money> {
        grand_total(self.invoice.lines())
    }

    /// Render both documents. Totals are recomputed as part of rendering,
    /// so an export never carries stale numbers.
    pub fn export(&mut self) -> Result<ExportBundle, RenderError> {
        let documents = quickbill_documents::render(&mut self.invoice, &self.profile)?;
        let bundle = ExportBundle::from_documents(documents);
        info!(
            session = %self.id,
            lines = self.invoice.len(),
            "invoice exported"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickbill_core::Money;

    fn entry(brand: &str, reference: &str, kind: &str, price: &str) -> CatalogEntry {
        CatalogEntry {
            brand: brand.to_string(),
            reference_code: reference.to_string(),
            kind: kind.to_string(),
            price: price.parse().unwrap(),
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(vec![
            entry("Acme", "N123", "Tablet", "10.00"),
            entry("Beta", "B200", "Strip", "5.00"),
        ]))
    }

    fn session() -> Session {
        Session::new(
            catalog(),
            BusinessProfile::default(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
    }

    #[test]
    fn add_defaults_quantity_to_one() {
        let mut session = session();
        let entry = session.search(&CatalogQuery::new("acme", "", ""))[0].clone();
        session.add(&entry, None).unwrap();

        assert_eq!(session.invoice().lines()[0].quantity, 1);
        assert_eq!(session.grand_total().unwrap(), "10.00".parse().unwrap());
    }

    #[test]
    fn sessions_are_isolated() {
        let catalog = catalog();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut first = Session::new(catalog.clone(), BusinessProfile::default(), date);
        let second = Session::new(catalog, BusinessProfile::default(), date);

        let entry = first.catalog().entries()[0].clone();
        first.add(&entry, Some(3)).unwrap();

        assert_eq!(first.invoice().len(), 1);
        assert!(second.invoice().is_empty());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn export_refreshes_totals() {
        let mut session = session();
        let entry = session.catalog().entries()[0].clone();
        session.add(&entry, Some(3)).unwrap();
        session.invoice_mut().lines_mut()[0].quantity = 4;

        session.export().unwrap();
        let expected: Money = "40.00".parse().unwrap();
        assert_eq!(session.invoice().lines()[0].line_total, expected);
    }
}
