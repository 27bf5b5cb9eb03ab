//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use paramsheet_core::{CellAddress, Worksheet, MAX_COLS, MAX_ROWS};

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let path = path.as_ref();
        let file = File::open(path)?;

        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if !stem.is_empty() => {
                let options = CsvReadOptions {
                    sheet_name: stem.to_string(),
                    ..options.clone()
                };
                Self::read(file, &options)
            }
            _ => Self::read(file, options),
        }
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Empty fields leave their cell unset and records may have different
    /// lengths. Empty lines are skipped, so a blank row must be written as a
    /// line of delimiters to survive.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            if row_idx >= MAX_ROWS as usize {
                return Err(CsvError::Parse {
                    row: row_idx + 1,
                    column: 1,
                    message: format!("more than {} rows", MAX_ROWS),
                });
            }

            for (col_idx, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                if col_idx >= MAX_COLS as usize {
                    return Err(CsvError::Parse {
                        row: row_idx + 1,
                        column: col_idx + 1,
                        message: format!("more than {} columns", MAX_COLS),
                    });
                }
                let addr = CellAddress::new(row_idx as u32, col_idx as u16);
                worksheet.set_text_at(addr, field);
            }
        }

        Ok(worksheet)
    }
}
