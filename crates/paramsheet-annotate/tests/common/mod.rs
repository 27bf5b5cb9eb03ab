//! Call-recording fake grid for scanner tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use paramsheet_core::{validate_binding_name, CellAddress, Error, Result, Rgba, SheetAccess};

/// One call made against the grid
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetBinding(String, String),
    ClearBinding(String),
    SetUnit(String, String),
    SetBackground(String),
    SetForeground(String),
    Commit,
}

/// In-memory grid that records every write
#[derive(Debug, Default)]
pub struct FakeGrid {
    pub text: HashMap<CellAddress, String>,
    pub bindings: HashMap<CellAddress, String>,
    pub units: HashMap<CellAddress, String>,
    pub backgrounds: HashMap<CellAddress, Rgba>,
    pub foregrounds: HashMap<CellAddress, Rgba>,
    /// Cells whose text read fails
    pub unreadable: HashSet<CellAddress>,
    /// Names bound on some other sheet
    pub foreign_bindings: HashSet<String>,
    /// Cells whose binding cannot be cleared
    pub locked: HashSet<CellAddress>,
    pub ops: Vec<Op>,
    /// Every text read, in order
    reads: RefCell<Vec<CellAddress>>,
}

pub fn addr(s: &str) -> CellAddress {
    CellAddress::parse(s).unwrap()
}

impl FakeGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from (cell, text) pairs
    pub fn with_text(cells: &[(&str, &str)]) -> Self {
        let mut grid = Self::new();
        for (cell, text) in cells {
            grid.text.insert(addr(cell), text.to_string());
        }
        grid
    }

    pub fn bind(&mut self, cell: &str, name: &str) {
        self.bindings.insert(addr(cell), name.to_string());
    }

    pub fn binding_of(&self, cell: &str) -> Option<&str> {
        self.bindings.get(&addr(cell)).map(String::as_str)
    }

    pub fn unit_of(&self, cell: &str) -> Option<&str> {
        self.units.get(&addr(cell)).map(String::as_str)
    }

    /// Cells whose text was read, in order
    pub fn read_log(&self) -> Vec<CellAddress> {
        self.reads.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.ops.iter().filter(|op| **op != Op::Commit).count()
    }
}

impl SheetAccess for FakeGrid {
    fn sheet_name(&self) -> &str {
        "Params"
    }

    fn read_text(&self, cell: CellAddress) -> Result<Option<String>> {
        self.reads.borrow_mut().push(cell);
        if self.unreadable.contains(&cell) {
            return Err(Error::UnreadableCell(cell.to_string()));
        }
        Ok(self.text.get(&cell).cloned())
    }

    fn binding(&self, cell: CellAddress) -> Option<String> {
        self.bindings.get(&cell).cloned()
    }

    fn set_binding(&mut self, cell: CellAddress, name: &str) -> Result<()> {
        self.ops.push(Op::SetBinding(cell.to_string(), name.to_string()));
        validate_binding_name(name)?;
        let taken_here = self
            .bindings
            .iter()
            .any(|(other, bound)| *other != cell && bound == name);
        if taken_here || self.foreign_bindings.contains(name) {
            return Err(Error::DuplicateBinding {
                name: name.to_string(),
                existing: "elsewhere".into(),
            });
        }
        self.bindings.insert(cell, name.to_string());
        Ok(())
    }

    fn clear_binding(&mut self, cell: CellAddress) -> Result<()> {
        self.ops.push(Op::ClearBinding(cell.to_string()));
        if self.locked.contains(&cell) {
            return Err(Error::other("binding is locked"));
        }
        self.bindings.remove(&cell);
        Ok(())
    }

    fn display_unit(&self, cell: CellAddress) -> Option<String> {
        self.units.get(&cell).cloned()
    }

    fn set_display_unit(&mut self, cell: CellAddress, unit: &str) -> Result<()> {
        self.ops.push(Op::SetUnit(cell.to_string(), unit.to_string()));
        self.units.insert(cell, unit.to_string());
        Ok(())
    }

    fn background(&self, cell: CellAddress) -> Rgba {
        self.backgrounds.get(&cell).copied().unwrap_or(Rgba::WHITE)
    }

    fn set_background(&mut self, cell: CellAddress, color: Rgba) -> Result<()> {
        self.ops.push(Op::SetBackground(cell.to_string()));
        self.backgrounds.insert(cell, color);
        Ok(())
    }

    fn set_foreground(&mut self, cell: CellAddress, color: Rgba) -> Result<()> {
        self.ops.push(Op::SetForeground(cell.to_string()));
        self.foregrounds.insert(cell, color);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.ops.push(Op::Commit);
        Ok(())
    }
}
