//! # paramsheet
//!
//! Keeps the parameter sheets of a CAD document in sync with the cells that
//! hold their values.
//!
//! A parameter sheet lists names in column A and values in column B. The
//! annotator binds each value cell to its name so formulas can refer to
//! `width` instead of `B2`, sets the display unit from value text like
//! `12.5 mm`, and colors value cells whose description starts with a style
//! tag such as `[calc]`.
//!
//! ## Features
//!
//! - In-memory document with document-wide unique bindings
//! - Idempotent sheet annotation with per-row failure reporting
//! - JSON snapshots that keep all cell metadata
//! - CSV text import and export
//!
//! ## Example
//!
//! ```rust
//! use paramsheet::prelude::*;
//!
//! let mut workbook = Workbook::empty();
//! workbook.add_worksheet_with_name("Params").unwrap();
//!
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_text("A1", "width").unwrap();
//! sheet.set_text("B1", "12.5 mm").unwrap();
//! sheet.set_text("C1", "[fixed] outer width").unwrap();
//!
//! let report = workbook.annotate();
//! assert_eq!(report.change_count(), 3);
//!
//! // Running again finds nothing to do
//! assert!(!workbook.annotate().had_changes());
//!
//! // Save to file
//! // workbook.save("gearbox.json").unwrap();
//! ```

pub mod annotate;
pub mod prelude;
pub mod snapshot;

pub use annotate::{DocumentAnnotateExt, DocumentReport, SheetSelector};
pub use snapshot::WorkbookSnapshot;

// Re-export core types
pub use paramsheet_core::{
    validate_binding_name, BindingRegistry, BindingTarget, CellAddress, CellData, Error, Result,
    Rgba, SheetAccess, SheetHandle, Workbook, Worksheet, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export annotation types
pub use paramsheet_annotate::{
    annotate_sheet, classify, AnnotateOptions, Change, FailedAction, NameClass, RowFailure,
    SheetReport, StopReason, StyleFamily, DEFAULT_BLANK_RUN_LIMIT, DEFAULT_UNITS,
};

// Re-export I/O types
pub use paramsheet_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

use std::path::Path;

/// File formats `open` and `save` understand, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON snapshot with all cell metadata
    Json,
    /// Text of a single sheet
    Csv,
}

impl FileFormat {
    /// Format for a path, by case-insensitive extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(FileFormat::Json),
            "csv" => Some(FileFormat::Csv),
            _ => None,
        }
    }

    /// Whether bindings, display units and colors survive a save
    pub fn keeps_annotations(self) -> bool {
        match self {
            FileFormat::Json => true,
            FileFormat::Csv => false,
        }
    }
}

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a `.json` snapshot or a `.csv` file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the workbook to a `.json` snapshot or a `.csv` file
    ///
    /// CSV keeps only the text of the first sheet.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

fn unsupported(path: &Path) -> Error {
    Error::other(format!("Unsupported file format: {}", path.display()))
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();

        match FileFormat::from_path(path).ok_or_else(|| unsupported(path))? {
            FileFormat::Json => snapshot::read_file(path),
            FileFormat::Csv => {
                let worksheet = CsvReader::read_file(path, &CsvReadOptions::default())
                    .map_err(|e| Error::other(e.to_string()))?;

                let mut workbook = Workbook::empty();
                workbook.add_existing_worksheet(worksheet)?;
                Ok(workbook)
            }
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        match FileFormat::from_path(path).ok_or_else(|| unsupported(path))? {
            FileFormat::Json => snapshot::write_file(self, path),
            FileFormat::Csv => {
                if let Some(sheet) = self.worksheet(0) {
                    CsvWriter::write_file(sheet, path, &CsvWriteOptions::default())
                        .map_err(|e| Error::other(e.to_string()))
                } else {
                    Err(Error::other("No worksheets to save"))
                }
            }
        }
    }
}
