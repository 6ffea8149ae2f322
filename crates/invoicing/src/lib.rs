//! Invoicing domain module.
//!
//! Business rules for the invoice-in-progress: an ordered, single-writer line
//! store plus the total calculator, implemented purely as deterministic
//! domain logic (no IO, no rendering, no storage).

pub mod invoice;

pub use invoice::{Invoice, InvoiceLine, LineDraft, grand_total};
