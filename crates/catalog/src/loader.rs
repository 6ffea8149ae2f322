//! Catalog source loading.
//!
//! The price list lives in a spreadsheet (the original operators maintain a
//! `Price List.xlsx`) or a CSV export of it. Format is resolved from the file
//! extension; either way the result is the same in-memory [`Catalog`].
//!
//! Expected columns: Brand, a reference column (any header containing
//! "ref"), Type, Price. Header matching is case-insensitive.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use thiserror::Error;
use tracing::info;

use crate::entry::{Catalog, CatalogEntry};
use quickbill_core::Money;

/// Failure to produce a catalog from its source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source cannot be opened or read at all. Fatal to the search path;
    /// surfaced at startup so the session never runs without a catalog.
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),

    /// The source opened but its contents are not a price list (missing
    /// columns, unparseable price). Names the offending row or column.
    #[error("catalog data format: {0}")]
    DataFormat(String),
}

/// Load a catalog from an XLSX/XLS workbook or a CSV file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let catalog = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        "csv" => load_csv(path),
        other => Err(CatalogError::Unavailable(format!(
            "unsupported catalog format {other:?} (expected a spreadsheet or csv): {}",
            path.display()
        ))),
    }?;

    info!(entries = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(catalog)
}

/// Column indices resolved from a header row.
struct Columns {
    brand: usize,
    reference: usize,
    kind: usize,
    price: usize,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, CatalogError> {
        Ok(Self {
            brand: find_column(headers, "brand", |h| h == "brand")?,
            // Tolerates headers like "Ref# (NDC)".
            reference: find_column(headers, "reference", |h| h.contains("ref"))?,
            kind: find_column(headers, "type", |h| h == "type")?,
            price: find_column(headers, "price", |h| h == "price")?,
        })
    }
}

fn find_column(
    headers: &[String],
    name: &str,
    pred: impl Fn(&str) -> bool,
) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| pred(&h.to_lowercase()))
        .ok_or_else(|| CatalogError::DataFormat(format!("missing {name} column")))
}

fn load_workbook(path: &Path) -> Result<Catalog, CatalogError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| CatalogError::Unavailable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogError::Unavailable("workbook has no sheets".to_string()))?
        .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| CatalogError::DataFormat("catalog sheet is empty".to_string()))?
        .iter()
        .map(cell_text)
        .collect();
    let columns = Columns::resolve(&headers)?;

    let mut entries = Vec::new();
    for (i, row) in rows.enumerate() {
        let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
        // Row numbers are 1-based and include the header.
        push_row(
            &mut entries,
            i + 2,
            cell(columns.brand),
            cell(columns.reference),
            cell(columns.kind),
            cell(columns.price),
        )?;
    }

    Ok(Catalog::new(entries))
}

fn load_csv(path: &Path) -> Result<Catalog, CatalogError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| CatalogError::Unavailable(e.to_string()))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::DataFormat(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = Columns::resolve(&headers)?;

    let mut entries = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CatalogError::DataFormat(e.to_string()))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        push_row(
            &mut entries,
            i + 2,
            field(columns.brand),
            field(columns.reference),
            field(columns.kind),
            field(columns.price),
        )?;
    }

    Ok(Catalog::new(entries))
}

fn push_row(
    entries: &mut Vec<CatalogEntry>,
    row_number: usize,
    brand: String,
    reference_code: String,
    kind: String,
    price_text: String,
) -> Result<(), CatalogError> {
    // Blank separator rows are tolerated; they carry no item.
    if brand.is_empty() && reference_code.is_empty() {
        return Ok(());
    }

    let price: Money = price_text.parse().map_err(|_| {
        CatalogError::DataFormat(format!(
            "row {row_number}: price {price_text:?} is not numeric"
        ))
    })?;

    entries.push(CatalogEntry {
        brand,
        reference_code,
        kind,
        price,
    });
    Ok(())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Reference codes read back as floats; keep integral values clean.
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}
