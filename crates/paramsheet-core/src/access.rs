//! Capability interface over a single sheet
//!
//! [`SheetAccess`] is everything the annotation engine needs from a host
//! document: cell text, the binding channel, the display-unit channel, the color
//! channels and a commit signal. [`SheetHandle`] implements it for one sheet of
//! the in-memory [`Workbook`].

use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::style::Rgba;
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;

/// Per-cell operations a host document exposes for one sheet
pub trait SheetAccess {
    /// Name of the sheet being accessed
    fn sheet_name(&self) -> &str;

    /// Raw text of a cell
    ///
    /// `Ok(None)` means the cell was never set; `Err` means the host could not
    /// read it.
    fn read_text(&self, cell: CellAddress) -> Result<Option<String>>;

    /// Binding currently attached to a cell
    fn binding(&self, cell: CellAddress) -> Option<String>;

    /// Attach a binding to a cell
    fn set_binding(&mut self, cell: CellAddress, name: &str) -> Result<()>;

    /// Detach the binding from a cell
    fn clear_binding(&mut self, cell: CellAddress) -> Result<()>;

    /// Display unit of a cell
    fn display_unit(&self, cell: CellAddress) -> Option<String>;

    /// Set the display unit of a cell without touching its text
    fn set_display_unit(&mut self, cell: CellAddress, unit: &str) -> Result<()>;

    /// Background color of a cell
    fn background(&self, cell: CellAddress) -> Rgba;

    /// Set the background color of a cell
    fn set_background(&mut self, cell: CellAddress, color: Rgba) -> Result<()>;

    /// Set the foreground (text) color of a cell
    fn set_foreground(&mut self, cell: CellAddress, color: Rgba) -> Result<()>;

    /// Make prior writes visible to subsequent reads and dependent state
    fn commit(&mut self) -> Result<()>;
}

/// Mutable view of one sheet of a [`Workbook`]
#[derive(Debug)]
pub struct SheetHandle<'a> {
    workbook: &'a mut Workbook,
    index: usize,
}

impl<'a> SheetHandle<'a> {
    pub(crate) fn new(workbook: &'a mut Workbook, index: usize) -> Self {
        Self { workbook, index }
    }

    /// Index of the sheet in its workbook
    pub fn index(&self) -> usize {
        self.index
    }

    fn sheet(&self) -> Option<&Worksheet> {
        self.workbook.worksheet(self.index)
    }

    fn sheet_mut(&mut self) -> Result<&mut Worksheet> {
        let count = self.workbook.sheet_count();
        self.workbook
            .worksheet_mut(self.index)
            .ok_or(Error::SheetOutOfBounds(self.index, count))
    }
}

impl SheetAccess for SheetHandle<'_> {
    fn sheet_name(&self) -> &str {
        self.sheet().map_or("", |ws| ws.name())
    }

    fn read_text(&self, cell: CellAddress) -> Result<Option<String>> {
        let count = self.workbook.sheet_count();
        let sheet = self
            .sheet()
            .ok_or(Error::SheetOutOfBounds(self.index, count))?;
        Ok(sheet.text_at(cell).map(str::to_string))
    }

    fn binding(&self, cell: CellAddress) -> Option<String> {
        self.workbook.binding(self.index, cell).map(str::to_string)
    }

    fn set_binding(&mut self, cell: CellAddress, name: &str) -> Result<()> {
        self.workbook.set_binding(self.index, cell, name)
    }

    fn clear_binding(&mut self, cell: CellAddress) -> Result<()> {
        self.workbook.clear_binding(self.index, cell).map(|_| ())
    }

    fn display_unit(&self, cell: CellAddress) -> Option<String> {
        self.sheet()?.unit_at(cell).map(str::to_string)
    }

    fn set_display_unit(&mut self, cell: CellAddress, unit: &str) -> Result<()> {
        self.sheet_mut()?.set_unit_at(cell, Some(unit.to_string()));
        Ok(())
    }

    fn background(&self, cell: CellAddress) -> Rgba {
        self.sheet()
            .map_or(crate::style::DEFAULT_BACKGROUND, |ws| ws.background_at(cell))
    }

    fn set_background(&mut self, cell: CellAddress, color: Rgba) -> Result<()> {
        self.sheet_mut()?.set_background_at(cell, color);
        Ok(())
    }

    fn set_foreground(&mut self, cell: CellAddress, color: Rgba) -> Result<()> {
        self.sheet_mut()?.set_foreground_at(cell, color);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.workbook.commit();
        Ok(())
    }
}
