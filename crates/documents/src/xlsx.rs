//! Spreadsheet output: one worksheet mirroring the PDF's display sequence.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::RenderError;
use crate::profile::BusinessProfile;
use crate::sheet::{COLUMN_TITLES, DocumentSheet};

const SHEET_NAME: &str = "Invoice";

/// Title sits on row 1 (merged across all columns); the table starts a fixed
/// two rows below it.
const DATE_ROW: u32 = 0;
const TITLE_ROW: u32 = 1;
const TABLE_HEADER_ROW: u32 = 3;
/// Blank rows between the last table row and the footer block.
const FOOTER_GAP: u32 = 2;

/// Column widths in character units, same relative proportions as the PDF
/// (60:40:20:35:35:25:40).
const COLUMN_CHAR_WIDTHS: [f64; 7] = [24.0, 16.0, 8.0, 14.0, 14.0, 10.0, 16.0];

/// Render the display sequence as a single-sheet XLSX workbook.
pub fn render_xlsx(
    sheet: &DocumentSheet,
    profile: &BusinessProfile,
) -> Result<Vec<u8>, RenderError> {
    let bold = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let date_format = Format::new().set_bold().set_align(FormatAlign::Right);
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(sheet_error)?;

    for (col, width) in COLUMN_CHAR_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(sheet_error)?;
    }

    let last_col = (COLUMN_TITLES.len() - 1) as u16;
    worksheet
        .write_string_with_format(
            DATE_ROW,
            last_col,
            format!("Invoice Date: {}", sheet.invoice_date),
            &date_format,
        )
        .map_err(sheet_error)?;
    worksheet
        .merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, "Invoice", &title_format)
        .map_err(sheet_error)?;

    for (col, title) in COLUMN_TITLES.iter().enumerate() {
        worksheet
            .write_string_with_format(TABLE_HEADER_ROW, col as u16, *title, &header_format)
            .map_err(sheet_error)?;
    }

    let mut row = TABLE_HEADER_ROW + 1;
    for display_row in &sheet.rows {
        for (col, cell) in display_row.cells().iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, *cell, &cell_format)
                .map_err(sheet_error)?;
        }
        row += 1;
    }

    // Footer block: tracking/carrier, payment instructions, address. Leading
    // lines of each group act as labels and are bold.
    let mut footer_row = row + FOOTER_GAP;
    worksheet
        .write_string_with_format(footer_row, 0, "Tracking #", &bold)
        .map_err(sheet_error)?;
    worksheet
        .write_string(footer_row, 1, &sheet.tracking_number)
        .map_err(sheet_error)?;
    worksheet
        .write_string(footer_row, 2, &profile.carrier)
        .map_err(sheet_error)?;
    footer_row += 2;

    footer_row = write_lines(worksheet, footer_row, &profile.payment_lines, &bold)?;
    footer_row += 1;
    write_lines(worksheet, footer_row, &profile.business_lines, &bold)?;

    workbook.save_to_buffer().map_err(sheet_error)
}

fn write_lines(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    start_row: u32,
    lines: &[String],
    label_format: &Format,
) -> Result<u32, RenderError> {
    let mut row = start_row;
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            worksheet
                .write_string_with_format(row, 0, line, label_format)
                .map_err(sheet_error)?;
        } else {
            worksheet.write_string(row, 0, line).map_err(sheet_error)?;
        }
        row += 1;
    }
    Ok(row)
}

fn sheet_error(e: XlsxError) -> RenderError {
    RenderError::Spreadsheet(e.to_string())
}
