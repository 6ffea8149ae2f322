//! Export sinks: finished documents under fixed file names and media types.
//!
//! The renderer hands over opaque bytes; this module only names them and
//! writes them somewhere a download (or a filesystem) can pick them up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quickbill_documents::RenderedDocuments;

pub const PDF_FILE_NAME: &str = "invoice.pdf";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const SPREADSHEET_FILE_NAME: &str = "invoice.xlsx";
pub const SPREADSHEET_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One downloadable file.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Both documents of one export, ready for a sink.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub pdf: ExportFile,
    pub spreadsheet: ExportFile,
}

impl ExportBundle {
    pub fn from_documents(documents: RenderedDocuments) -> Self {
        Self {
            pdf: ExportFile {
                file_name: PDF_FILE_NAME,
                media_type: PDF_MEDIA_TYPE,
                bytes: documents.pdf,
            },
            spreadsheet: ExportFile {
                file_name: SPREADSHEET_FILE_NAME,
                media_type: SPREADSHEET_MEDIA_TYPE,
                bytes: documents.spreadsheet,
            },
        }
    }

    /// Write both files into `dir`, returning their paths.
    pub fn write_to(&self, dir: &Path) -> io::Result<(PathBuf, PathBuf)> {
        let pdf_path = dir.join(self.pdf.file_name);
        let spreadsheet_path = dir.join(self.spreadsheet.file_name);
        fs::write(&pdf_path, &self.pdf.bytes)?;
        fs::write(&spreadsheet_path, &self.spreadsheet.bytes)?;
        Ok((pdf_path, spreadsheet_path))
    }
}
