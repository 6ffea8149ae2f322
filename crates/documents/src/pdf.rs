//! Print-ready PDF output: landscape A4, bordered seven-column table,
//! footer block with tracking, payment, and address lines.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::RenderError;
use crate::profile::BusinessProfile;
use crate::sheet::{COLUMN_TITLES, DocumentSheet};

// Landscape A4.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;

/// Relative column widths in mm (60:40:20:35:35:25:40).
const COLUMN_WIDTHS: [f32; 7] = [60.0, 40.0, 20.0, 35.0, 35.0, 25.0, 40.0];
const ROW_HEIGHT: f32 = 8.0;
const FOOTER_LINE_HEIGHT: f32 = 6.0;

const HEADER_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 14.0;
const CELL_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 11.0;

fn table_width() -> f32 {
    COLUMN_WIDTHS.iter().sum()
}

/// Render the display sequence as a paginated PDF.
pub fn render_pdf(sheet: &DocumentSheet, profile: &BusinessProfile) -> Result<Vec<u8>, RenderError> {
    let (doc, page1, layer1) = PdfDocument::new("Invoice", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let mut layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut y = draw_page_header(&layer, &font, &font_bold, sheet);

    for row in &sheet.rows {
        if y - ROW_HEIGHT < MARGIN {
            // Continuation page keeps the header and column layout.
            let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(layer_index);
            y = draw_page_header(&layer, &font, &font_bold, sheet);
        }
        draw_table_row(&layer, &font, row.cells(), y);
        y -= ROW_HEIGHT;
    }

    // Footer block: tracking + carrier, payment instructions, address.
    let footer_lines = footer_lines(sheet, profile);
    let footer_height = (footer_lines.len() as f32 + 2.0) * FOOTER_LINE_HEIGHT;
    if y - footer_height < MARGIN {
        let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        layer = doc.get_page(page).get_layer(layer_index);
        y = PAGE_HEIGHT - MARGIN;
    }
    y -= 2.0 * FOOTER_LINE_HEIGHT;
    for line in &footer_lines {
        if !line.is_empty() {
            layer.use_text(line.as_str(), FOOTER_SIZE, Mm(MARGIN), Mm(y), &font);
        }
        y -= FOOTER_LINE_HEIGHT;
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Per-page header: right-aligned date, centered title, bold column row.
/// Returns the y of the first data row below it.
fn draw_page_header(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    sheet: &DocumentSheet,
) -> f32 {
    let mut y = PAGE_HEIGHT - MARGIN;

    let date_text = format!("Invoice Date: {}", sheet.invoice_date);
    let date_x = MARGIN + table_width() - text_width_mm(&date_text, HEADER_SIZE);
    layer.use_text(date_text.as_str(), HEADER_SIZE, Mm(date_x), Mm(y), font_bold);
    y -= 10.0;

    let title = "Invoice";
    let title_x = MARGIN + (table_width() - text_width_mm(title, TITLE_SIZE)) / 2.0;
    layer.use_text(title, TITLE_SIZE, Mm(title_x), Mm(y), font_bold);
    y -= 12.0;

    draw_table_row(layer, font, COLUMN_TITLES, y);
    y - ROW_HEIGHT
}

/// One bordered table row; `y` is the row's top edge.
fn draw_table_row(layer: &PdfLayerReference, font: &IndirectFontRef, cells: [&str; 7], y: f32) {
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        cell_border(layer, x, y, width, ROW_HEIGHT);
        if !cell.is_empty() {
            let text_x = centered_x(x, width, cell, CELL_SIZE);
            layer.use_text(*cell, CELL_SIZE, Mm(text_x), Mm(y - ROW_HEIGHT + 2.5), font);
        }
        x += width;
    }
}

fn cell_border(layer: &PdfLayerReference, x: f32, y_top: f32, width: f32, height: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x), Mm(y_top)), false),
            (Point::new(Mm(x + width), Mm(y_top)), false),
            (Point::new(Mm(x + width), Mm(y_top - height)), false),
            (Point::new(Mm(x), Mm(y_top - height)), false),
        ],
        is_closed: true,
    });
}

fn footer_lines(sheet: &DocumentSheet, profile: &BusinessProfile) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(profile.tracking_line(&sheet.tracking_number));
    lines.push(String::new());
    lines.extend(profile.payment_lines.iter().cloned());
    lines.push(String::new());
    lines.extend(profile.business_lines.iter().cloned());
    lines
}

/// Builtin Helvetica exposes no metrics here; a 0.5 em average glyph width
/// is close enough to place short table text.
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    const MM_PER_PT: f32 = 0.352_778;
    text.chars().count() as f32 * font_size * 0.5 * MM_PER_PT
}

fn centered_x(cell_x: f32, cell_width: f32, text: &str, font_size: f32) -> f32 {
    let text_width = text_width_mm(text, font_size);
    (cell_x + (cell_width - text_width) / 2.0).max(cell_x + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quickbill_invoicing::{Invoice, LineDraft};

    fn sheet_with_rows(count: usize) -> DocumentSheet {
        let mut invoice = Invoice::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        invoice.set_tracking_number("1Z999");
        let drafts: Vec<LineDraft> = (0..count)
            .map(|i| LineDraft {
                brand: format!("Brand {i}"),
                reference_code: format!("N{i:04}"),
                quantity: "2".to_string(),
                unit_price: "3.25".to_string(),
                ..LineDraft::default()
            })
            .collect();
        invoice.replace_all(&drafts).unwrap();
        DocumentSheet::prepare(&mut invoice).unwrap()
    }

    #[test]
    fn renders_a_small_table() {
        let bytes = render_pdf(&sheet_with_rows(2), &BusinessProfile::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn renders_enough_rows_to_paginate() {
        let small = render_pdf(&sheet_with_rows(2), &BusinessProfile::default()).unwrap();
        let large = render_pdf(&sheet_with_rows(120), &BusinessProfile::default()).unwrap();
        assert!(large.len() > small.len());
    }

    #[test]
    fn column_widths_fit_the_page() {
        assert!(table_width() + 2.0 * MARGIN <= PAGE_WIDTH);
    }
}
