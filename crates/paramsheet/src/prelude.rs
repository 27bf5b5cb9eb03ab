//! Prelude module - common imports for paramsheet users
//!
//! ```rust
//! use paramsheet::prelude::*;
//! ```

pub use crate::{
    // Annotation
    AnnotateOptions,
    CellAddress,
    Change,
    DocumentAnnotateExt,
    DocumentReport,

    // Error types
    Error,
    FileFormat,
    Result,
    Rgba,
    SheetAccess,
    SheetReport,
    SheetSelector,
    StyleFamily,

    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};
