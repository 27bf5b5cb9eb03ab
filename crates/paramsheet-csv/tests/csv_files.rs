//! CSV file import/export through the filesystem

use paramsheet_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use paramsheet_core::Worksheet;
use pretty_assertions::assert_eq;

/// Sheet name comes from the file stem
#[test]
fn test_read_file_names_sheet_after_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gearbox_params.csv");
    std::fs::write(&path, "Params\nmodule,2 mm\nteeth,24\n").unwrap();

    let ws = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();

    assert_eq!(ws.name(), "gearbox_params");
    assert_eq!(ws.text("A2").unwrap(), Some("module"));
    assert_eq!(ws.text("B3").unwrap(), Some("24"));
}

/// Text written to disk reads back cell for cell, blank rows included
#[test]
fn test_file_roundtrip_keeps_blank_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.csv");

    let mut ws = Worksheet::new("params");
    ws.set_text("A1", "width").unwrap();
    ws.set_text("B1", "=2 * 6 mm").unwrap();
    ws.set_text("C1", "[calc] \"quoted\" note").unwrap();
    ws.set_text("A4", "--").unwrap();
    ws.set_text("A5", "Unicode: \u{00B0}").unwrap();

    CsvWriter::write_file(&ws, &path, &CsvWriteOptions::default()).unwrap();
    let back = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();

    let original: Vec<_> = ws.cells().map(|(a, c)| (a, c.text.clone())).collect();
    let restored: Vec<_> = back.cells().map(|(a, c)| (a, c.text.clone())).collect();
    assert_eq!(original, restored);
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvReader::read_file(dir.path().join("nope.csv"), &CsvReadOptions::default())
        .unwrap_err();

    assert!(matches!(err, paramsheet_csv::CsvError::Io(_)));
}
