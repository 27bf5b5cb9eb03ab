//! Cell storage implementation
//!
//! Sparse storage for worksheet cells. Only cells that carry text or metadata
//! are stored, using a row-based BTreeMap structure.

use std::collections::BTreeMap;

use super::CellAddress;
use crate::style::Rgba;

/// Complete data for a single cell
///
/// Text content and the metadata channels (binding, display unit, colors) are
/// independent: writing one never touches the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    /// Raw text content (`None` = never set)
    pub text: Option<String>,
    /// Binding (alias) attached to this cell
    pub binding: Option<String>,
    /// Display unit metadata
    pub unit: Option<String>,
    /// Background color (`None` = host default)
    pub background: Option<Rgba>,
    /// Foreground color (`None` = host default)
    pub foreground: Option<Rgba>,
}

impl CellData {
    /// Check if this cell carries neither text nor metadata
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.binding.is_none()
            && self.unit.is_none()
            && self.background.is_none()
            && self.foreground.is_none()
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
}

impl CellStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cell data at a position
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get mutable cell data, creating an empty cell if needed
    pub fn get_or_insert(&mut self, row: u32, col: u16) -> &mut CellData {
        self.rows.entry(row).or_default().entry(col).or_default()
    }

    /// Apply a mutation to a cell and drop it again if it ends up empty
    pub fn update<F, T>(&mut self, row: u32, col: u16, f: F) -> T
    where
        F: FnOnce(&mut CellData) -> T,
    {
        let result = f(self.get_or_insert(row, col));
        self.prune(row, col);
        result
    }

    fn prune(&mut self, row: u32, col: u16) {
        if let Some(cols) = self.rows.get_mut(&row) {
            if cols.get(&col).map_or(false, CellData::is_empty) {
                cols.remove(&col);
            }
            if cols.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    /// Number of stored (non-empty) cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, data)| (CellAddress::new(row, col), data))
        })
    }

    /// Highest stored row index, if any
    pub fn last_row(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }
}
