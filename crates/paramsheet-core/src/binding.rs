//! Cell bindings (aliases)
//!
//! A binding attaches a symbolic name to exactly one cell so other cells can
//! refer to it by name instead of by position. Names are unique across the whole
//! workbook and compared case-sensitively.
//!
//! # Example
//!
//! ```text
//! // Bind "length" to Params!B3, then refer to it from elsewhere
//! =length * 2
//! ```

use std::collections::HashMap;

use crate::cell::CellAddress;
use crate::error::{Error, Result};

/// Where a binding points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingTarget {
    /// Index of the sheet holding the bound cell
    pub sheet: usize,
    /// The bound cell
    pub cell: CellAddress,
}

impl BindingTarget {
    pub fn new(sheet: usize, cell: CellAddress) -> Self {
        Self { sheet, cell }
    }
}

/// Check a binding name against the host syntax rules.
///
/// A name must start with an ASCII letter, continue with ASCII letters, digits or
/// underscores, and must not read as a cell coordinate (`B12` would shadow the
/// cell it names).
pub fn validate_binding_name(name: &str) -> Result<()> {
    let reject = |reason| {
        Err(Error::InvalidBindingName {
            name: name.to_string(),
            reason,
        })
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return reject("name is empty"),
        Some(c) if !c.is_ascii_alphabetic() => return reject("must start with a letter"),
        Some(_) => {}
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return reject("only letters, digits and underscores are allowed");
    }

    if CellAddress::parse(name).is_ok() {
        return reject("name looks like a cell address");
    }

    Ok(())
}

/// Collection of bindings with lookup by name
#[derive(Debug, Default, Clone)]
pub struct BindingRegistry {
    by_name: HashMap<String, BindingTarget>,
}

impl BindingRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new binding
    ///
    /// Fails if the name breaks the syntax rules or is already bound to a
    /// different cell. Re-defining a name on the same cell is a no-op.
    pub fn define(&mut self, name: &str, target: BindingTarget) -> Result<()> {
        validate_binding_name(name)?;

        if let Some(existing) = self.by_name.get(name) {
            if *existing == target {
                return Ok(());
            }
            return Err(Error::DuplicateBinding {
                name: name.to_string(),
                existing: format!("sheet {} cell {}", existing.sheet, existing.cell),
            });
        }

        self.by_name.insert(name.to_string(), target);
        Ok(())
    }

    /// Remove a binding by name
    pub fn remove(&mut self, name: &str) -> Option<BindingTarget> {
        self.by_name.remove(name)
    }

    /// Get the target of a binding
    pub fn get(&self, name: &str) -> Option<&BindingTarget> {
        self.by_name.get(name)
    }

    /// Check if a name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate over all bindings, ordered by sheet then cell
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindingTarget)> {
        let mut entries: Vec<_> = self
            .by_name
            .iter()
            .map(|(name, target)| (name.as_str(), target))
            .collect();
        entries.sort_by_key(|(_, target)| (target.sheet, target.cell));
        entries.into_iter()
    }

    /// Remove every binding that points into `sheet` and shift later sheet indices down
    pub(crate) fn remove_sheet(&mut self, sheet: usize) {
        self.by_name.retain(|_, target| target.sheet != sheet);
        for target in self.by_name.values_mut() {
            if target.sheet > sheet {
                target.sheet -= 1;
            }
        }
    }

    /// Get the number of bindings
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
