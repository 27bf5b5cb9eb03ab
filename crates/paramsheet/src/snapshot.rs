//! JSON snapshot of a workbook
//!
//! Unlike CSV, a snapshot keeps every piece of cell metadata: bindings,
//! display units and both colors. Colors are stored as `[r, g, b, a]` arrays
//! of floats so a saved and reloaded document compares equal to the original
//! and a re-run of the annotator stays a no-op.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CellAddress, Error, Result, Rgba, Workbook};

/// Serialized form of a [`Workbook`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookSnapshot {
    pub sheets: Vec<SheetSnapshot>,
}

/// One sheet with its non-empty cells in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    pub name: String,
    #[serde(default)]
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// A1-style address
    pub cell: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<[f64; 4]>,
}

impl WorkbookSnapshot {
    /// Capture the full state of a workbook
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let sheets = workbook
            .worksheets()
            .map(|ws| SheetSnapshot {
                name: ws.name().to_string(),
                cells: ws
                    .cells()
                    .map(|(addr, data)| CellSnapshot {
                        cell: addr.to_a1_string(),
                        text: data.text.clone(),
                        binding: data.binding.clone(),
                        unit: data.unit.clone(),
                        background: data.background.map(|c| c.to_array()),
                        foreground: data.foreground.map(|c| c.to_array()),
                    })
                    .collect(),
            })
            .collect();
        Self { sheets }
    }

    /// Rebuild a workbook, validating sheet names and binding uniqueness
    pub fn into_workbook(self) -> Result<Workbook> {
        let mut workbook = Workbook::empty();

        for sheet in self.sheets {
            let index = workbook.add_worksheet_with_name(&sheet.name)?;
            let count = workbook.sheet_count();
            for cell in sheet.cells {
                let addr = CellAddress::parse(&cell.cell)?;
                let ws = workbook
                    .worksheet_mut(index)
                    .ok_or(Error::SheetOutOfBounds(index, count))?;

                if let Some(text) = cell.text {
                    ws.set_text_at(addr, text);
                }
                ws.set_unit_at(addr, cell.unit);
                if let Some(bg) = cell.background {
                    ws.set_background_at(addr, Rgba::from_array(bg));
                }
                if let Some(fg) = cell.foreground {
                    ws.set_foreground_at(addr, Rgba::from_array(fg));
                }
                if let Some(name) = cell.binding {
                    workbook.set_binding(index, addr, &name)?;
                }
            }
        }

        Ok(workbook)
    }

    /// Parse a snapshot from JSON
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| Error::other(format!("Invalid snapshot: {e}")))
    }

    /// Write the snapshot as pretty-printed JSON
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| Error::other(e.to_string()))
    }
}

/// Read a workbook from a JSON snapshot file
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::other(e.to_string()))?;
    let workbook = WorkbookSnapshot::read(BufReader::new(file))?.into_workbook()?;
    debug!(path = %path.display(), sheets = workbook.sheet_count(), "snapshot loaded");
    Ok(workbook)
}

/// Write a workbook to a JSON snapshot file
pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::other(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    WorkbookSnapshot::from_workbook(workbook).write(&mut writer)?;
    writer.flush().map_err(|e| Error::other(e.to_string()))?;
    debug!(path = %path.display(), "snapshot saved");
    Ok(())
}
