//! # paramsheet-csv
//!
//! Plain-text CSV import and export for paramsheet worksheets.
//!
//! Only cell text travels through CSV; bindings, display units and colors
//! have no CSV representation and are dropped on export.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
