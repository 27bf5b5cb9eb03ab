//! Workbook type - the main document structure

use std::collections::HashSet;

use crate::access::SheetHandle;
use crate::binding::{validate_binding_name, BindingRegistry, BindingTarget};
use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// A workbook contains worksheets, the workbook-wide binding registry and a
/// revision counter that advances on every [`Workbook::commit`].
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Bindings (aliases), unique across all sheets
    bindings: BindingRegistry,
    /// Number of commits so far
    revision: u64,
}

impl Workbook {
    /// Create a new empty workbook with one worksheet
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            bindings: BindingRegistry::new(),
            revision: 0,
        }
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            bindings: BindingRegistry::new(),
            revision: 0,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with default name
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));

        Ok(index)
    }

    /// Add an existing worksheet to the workbook
    ///
    /// Bindings already stored on the sheet's cells are registered; the sheet is
    /// rejected as a whole if any of them is invalid or already taken.
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;

        let mut seen = HashSet::new();
        for (cell, name) in worksheet.bindings() {
            validate_binding_name(name)?;
            if !seen.insert(name) {
                return Err(Error::DuplicateBinding {
                    name: name.to_string(),
                    existing: format!("{}!{}", worksheet.name(), cell),
                });
            }
            if let Some(existing) = self.bindings.get(name) {
                return Err(self.duplicate_error(name, existing));
            }
        }

        let index = self.worksheets.len();
        for (cell, name) in worksheet.bindings() {
            self.bindings.define(name, BindingTarget::new(index, cell))?;
        }
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Remove a worksheet by index, dropping its bindings
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }

        self.bindings.remove_sheet(index);
        Ok(self.worksheets.remove(index))
    }

    // ==================== Bindings ====================

    /// Binding attached to a cell
    pub fn binding(&self, sheet: usize, cell: CellAddress) -> Option<&str> {
        self.worksheets.get(sheet)?.binding_at(cell)
    }

    /// Attach `name` to a cell, replacing any binding the cell already has
    ///
    /// # Example
    /// ```
    /// use paramsheet_core::{CellAddress, Workbook};
    ///
    /// let mut wb = Workbook::new();
    /// let b1 = CellAddress::parse("B1").unwrap();
    /// wb.set_binding(0, b1, "width").unwrap();
    /// assert_eq!(wb.binding(0, b1), Some("width"));
    /// ```
    pub fn set_binding(&mut self, sheet: usize, cell: CellAddress, name: &str) -> Result<()> {
        if sheet >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(sheet, self.worksheets.len()));
        }

        let target = BindingTarget::new(sheet, cell);
        if let Some(existing) = self.bindings.get(name) {
            if *existing != target {
                return Err(self.duplicate_error(name, existing));
            }
        }
        self.bindings.define(name, target)?;

        let previous = self.worksheets[sheet].replace_binding_at(cell, Some(name.to_string()));
        if let Some(previous) = previous {
            if previous != name {
                self.bindings.remove(&previous);
            }
        }
        Ok(())
    }

    /// Detach the binding from a cell, returning the removed name
    pub fn clear_binding(&mut self, sheet: usize, cell: CellAddress) -> Result<Option<String>> {
        let count = self.worksheets.len();
        let worksheet = self
            .worksheets
            .get_mut(sheet)
            .ok_or(Error::SheetOutOfBounds(sheet, count))?;

        let previous = worksheet.replace_binding_at(cell, None);
        if let Some(name) = &previous {
            self.bindings.remove(name);
        }
        Ok(previous)
    }

    /// Look up which cell a binding points to
    pub fn binding_target(&self, name: &str) -> Option<&BindingTarget> {
        self.bindings.get(name)
    }

    /// Get the binding registry (read-only)
    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    fn duplicate_error(&self, name: &str, existing: &BindingTarget) -> Error {
        let sheet = self
            .worksheets
            .get(existing.sheet)
            .map_or("?", |ws| ws.name());
        Error::DuplicateBinding {
            name: name.to_string(),
            existing: format!("{}!{}", sheet, existing.cell),
        }
    }

    // ==================== Commit ====================

    /// Make prior writes visible to dependent state
    pub fn commit(&mut self) {
        self.revision += 1;
        tracing::trace!(revision = self.revision, "workbook committed");
    }

    /// Number of commits so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==================== Sheet access ====================

    /// Borrow one sheet through the [`crate::SheetAccess`] interface
    pub fn handle(&mut self, index: usize) -> Option<SheetHandle<'_>> {
        if index < self.worksheets.len() {
            Some(SheetHandle::new(self, index))
        } else {
            None
        }
    }

    /// Borrow a sheet by name through the [`crate::SheetAccess`] interface
    pub fn handle_by_name(&mut self, name: &str) -> Result<SheetHandle<'_>> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.into()))?;
        Ok(SheetHandle::new(self, index))
    }

    /// Validate a new sheet name against the naming rules and existing sheets
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']', '!'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Case-insensitive duplicate check
        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name).is_ok() {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
