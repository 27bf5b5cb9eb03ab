//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use paramsheet_core::{CellAddress, Worksheet};

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet's text to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet's text to a writer
    ///
    /// Every row from 1 to the last used row is written with the same number
    /// of fields, so blank rows come out as a line of delimiters.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        let width = worksheet
            .cells()
            .filter(|(_, cell)| cell.text.is_some())
            .map(|(addr, _)| addr.col + 1)
            .max()
            .unwrap_or(0);

        if width > 0 {
            for row in 0..worksheet.row_count() {
                let record: Vec<&str> = (0..width)
                    .map(|col| {
                        worksheet
                            .text_at(CellAddress::new(row, col))
                            .unwrap_or_default()
                    })
                    .collect();
                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
