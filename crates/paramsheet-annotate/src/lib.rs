//! # paramsheet-annotate
//!
//! Turns a parameter sheet's name column into cell bindings.
//!
//! For every row whose column-A text is a valid name, the value cell in column B
//! gets that name as its binding. With the unit pass enabled, a value such as
//! `12.5 mm` also gets `mm` as its display unit; with the style pass enabled, a
//! description in column C starting with `[calc]` or `[fixed]` colors the value
//! cell. Every pass only writes when something differs, so re-running on an
//! unchanged sheet is a no-op.
//!
//! The engine works against any [`paramsheet_core::SheetAccess`] implementation.
//!
//! ## Example
//!
//! ```rust
//! use paramsheet_annotate::{annotate_sheet, AnnotateOptions};
//! use paramsheet_core::{CellAddress, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_text("A1", "width").unwrap();
//! sheet.set_text("B1", "12.5 mm").unwrap();
//! sheet.set_text("A2", "--").unwrap();
//!
//! let mut handle = workbook.handle(0).unwrap();
//! let report = annotate_sheet(&mut handle, &AnnotateOptions::default());
//! assert!(report.had_changes);
//!
//! let b1 = CellAddress::parse("B1").unwrap();
//! assert_eq!(workbook.binding(0, b1), Some("width"));
//! assert_eq!(workbook.worksheet(0).unwrap().unit_at(b1), Some("mm"));
//! ```

pub mod classify;
pub mod options;
pub mod report;
pub mod scanner;
pub mod tag;
pub mod unit;

pub use classify::{classify, NameClass};
pub use options::{AnnotateOptions, DEFAULT_BLANK_RUN_LIMIT};
pub use report::{Change, FailedAction, RowFailure, SheetReport, StopReason};
pub use scanner::{annotate_sheet, plan_binding, BindingPlan};
pub use tag::{parse_tag, StyleFamily};
pub use unit::{extract_unit, split_quantity, DEFAULT_UNITS};
