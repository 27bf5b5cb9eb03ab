//! # paramsheet-core
//!
//! Core data structures for the paramsheet annotation tools.
//!
//! This crate provides the fundamental types used throughout paramsheet:
//! - [`CellAddress`] - Cell addressing and column arithmetic
//! - [`Rgba`] - Cell background/foreground colors
//! - [`BindingRegistry`] - Document-wide unique cell bindings (aliases)
//! - [`Workbook`], [`Worksheet`] - The in-memory document host
//! - [`SheetAccess`] - The capability interface the annotation engine drives
//!
//! ## Example
//!
//! ```rust
//! use paramsheet_core::{CellAddress, SheetAccess, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_text("A1", "length").unwrap();
//! sheet.set_text("B1", "12.5 mm").unwrap();
//!
//! let mut handle = workbook.handle(0).unwrap();
//! let value_cell = CellAddress::parse("B1").unwrap();
//! handle.set_binding(value_cell, "length").unwrap();
//! assert_eq!(handle.binding(value_cell).as_deref(), Some("length"));
//! ```

pub mod access;
pub mod binding;
pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use access::{SheetAccess, SheetHandle};
pub use binding::{validate_binding_name, BindingRegistry, BindingTarget};
pub use cell::{CellAddress, CellData, CellStorage};
pub use error::{Error, Result};
pub use style::Rgba;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (two-letter columns, A..ZZ)
pub const MAX_COLS: u16 = 702;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
