//! Worksheet type

use crate::cell::{CellAddress, CellData, CellStorage};
use crate::error::Result;
use crate::style::{Rgba, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};

/// A worksheet (single sheet in a workbook)
///
/// Text, display units and colors can be edited directly. Bindings are
/// workbook-wide and are edited through [`crate::Workbook`] so their
/// uniqueness can be enforced.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Text ===

    /// Get the raw text of a cell by A1 address
    pub fn text(&self, address: &str) -> Result<Option<&str>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.text_at(addr))
    }

    /// Get the raw text of a cell
    pub fn text_at(&self, addr: CellAddress) -> Option<&str> {
        self.cells
            .get(addr.row, addr.col)
            .and_then(|c| c.text.as_deref())
    }

    /// Set the raw text of a cell by A1 address
    pub fn set_text(&mut self, address: &str, text: impl Into<String>) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_text_at(addr, text);
        Ok(())
    }

    /// Set the raw text of a cell
    pub fn set_text_at(&mut self, addr: CellAddress, text: impl Into<String>) {
        let text = text.into();
        self.cells.update(addr.row, addr.col, |c| c.text = Some(text));
    }

    /// Remove the text of a cell, leaving its metadata in place
    pub fn clear_text_at(&mut self, addr: CellAddress) {
        self.cells.update(addr.row, addr.col, |c| c.text = None);
    }

    // === Display units ===

    /// Get the display unit of a cell
    pub fn unit_at(&self, addr: CellAddress) -> Option<&str> {
        self.cells
            .get(addr.row, addr.col)
            .and_then(|c| c.unit.as_deref())
    }

    /// Set or clear the display unit of a cell
    pub fn set_unit_at(&mut self, addr: CellAddress, unit: Option<String>) {
        self.cells.update(addr.row, addr.col, |c| c.unit = unit);
    }

    // === Colors ===

    /// Background color of a cell (host default when never set)
    pub fn background_at(&self, addr: CellAddress) -> Rgba {
        self.cells
            .get(addr.row, addr.col)
            .and_then(|c| c.background)
            .unwrap_or(DEFAULT_BACKGROUND)
    }

    /// Foreground color of a cell (host default when never set)
    pub fn foreground_at(&self, addr: CellAddress) -> Rgba {
        self.cells
            .get(addr.row, addr.col)
            .and_then(|c| c.foreground)
            .unwrap_or(DEFAULT_FOREGROUND)
    }

    /// Set the background color of a cell
    pub fn set_background_at(&mut self, addr: CellAddress, color: Rgba) {
        self.cells
            .update(addr.row, addr.col, |c| c.background = Some(color));
    }

    /// Set the foreground color of a cell
    pub fn set_foreground_at(&mut self, addr: CellAddress, color: Rgba) {
        self.cells
            .update(addr.row, addr.col, |c| c.foreground = Some(color));
    }

    // === Bindings ===

    /// Binding attached to a cell
    pub fn binding_at(&self, addr: CellAddress) -> Option<&str> {
        self.cells
            .get(addr.row, addr.col)
            .and_then(|c| c.binding.as_deref())
    }

    /// Replace the binding stored on a cell, returning the previous one
    pub(crate) fn replace_binding_at(
        &mut self,
        addr: CellAddress,
        binding: Option<String>,
    ) -> Option<String> {
        self.cells.update(addr.row, addr.col, |c| {
            std::mem::replace(&mut c.binding, binding)
        })
    }

    // === Iteration ===

    /// Get all data for a cell
    pub fn cell(&self, addr: CellAddress) -> Option<&CellData> {
        self.cells.get(addr.row, addr.col)
    }

    /// Iterate over all stored cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.cells.iter()
    }

    /// Bound cells on this sheet, in row-major order
    pub fn bindings(&self) -> impl Iterator<Item = (CellAddress, &str)> {
        self.cells
            .iter()
            .filter_map(|(addr, c)| c.binding.as_deref().map(|b| (addr, b)))
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Number of rows up to the last stored cell
    pub fn row_count(&self) -> u32 {
        self.cells.last_row().map_or(0, |r| r + 1)
    }
}
