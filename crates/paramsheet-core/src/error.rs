//! Error types for paramsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in paramsheet-core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Binding name rejected by the host's syntax rules
    #[error("Invalid binding name '{name}': {reason}")]
    InvalidBindingName { name: String, reason: &'static str },

    /// Binding name already attached to another cell
    #[error("Binding '{name}' is already used by {existing}")]
    DuplicateBinding { name: String, existing: String },

    /// Cell content could not be read
    #[error("Cell {0} is unreadable")]
    UnreadableCell(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error is a binding conflict or a rejected binding name
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidBindingName { .. } | Error::DuplicateBinding { .. }
        )
    }
}
