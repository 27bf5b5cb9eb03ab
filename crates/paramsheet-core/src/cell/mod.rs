//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1") and column arithmetic
//! - [`CellData`] - Cell text plus its metadata channels
//! - [`CellStorage`] - Sparse storage for a worksheet's cells

mod address;
mod storage;

pub use address::{shift_column, CellAddress};
pub use storage::{CellData, CellStorage};
