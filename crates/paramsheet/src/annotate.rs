//! Document-level annotation
//!
//! Runs the sheet scanner over every sheet whose name qualifies, in document
//! order.
//!
//! # Example
//!
//! ```rust
//! use paramsheet::prelude::*;
//!
//! let mut workbook = Workbook::empty();
//! workbook.add_worksheet_with_name("Params").unwrap();
//! workbook.add_worksheet_with_name("Notes").unwrap();
//!
//! let params = workbook.worksheet_mut(0).unwrap();
//! params.set_text("A1", "width").unwrap();
//! let notes = workbook.worksheet_mut(1).unwrap();
//! notes.set_text("A1", "height").unwrap();
//!
//! let report = workbook.annotate();
//! assert_eq!(report.sheets.len(), 1);
//! assert_eq!(report.skipped, vec!["Notes".to_string()]);
//! assert!(report.had_changes());
//! ```

use std::fmt;

use paramsheet_annotate::{annotate_sheet, AnnotateOptions, SheetReport};
use paramsheet_core::SheetAccess;
use regex::{Regex, RegexBuilder};
use tracing::{info, trace};

use crate::{Error, Result, Workbook};

/// Chooses which sheets are annotated
#[derive(Debug, Clone)]
pub enum SheetSelector {
    /// Name starts with the prefix, ignoring ASCII case
    Prefix(String),
    /// Name matches the regex
    Pattern(Regex),
}

impl SheetSelector {
    /// Prefix used by the default selector
    pub const DEFAULT_PREFIX: &'static str = "param";

    /// Build a case-insensitive regex selector
    pub fn pattern(pattern: &str) -> Result<Self> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(SheetSelector::Pattern)
            .map_err(|e| Error::other(format!("Invalid sheet pattern '{}': {}", pattern, e)))
    }

    /// Whether a sheet with this name should be annotated
    pub fn matches(&self, sheet_name: &str) -> bool {
        match self {
            SheetSelector::Prefix(prefix) => sheet_name
                .get(..prefix.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(prefix)),
            SheetSelector::Pattern(re) => re.is_match(sheet_name),
        }
    }
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Prefix(Self::DEFAULT_PREFIX.to_string())
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Prefix(prefix) => write!(f, "{}*", prefix),
            SheetSelector::Pattern(re) => write!(f, "/{}/i", re.as_str()),
        }
    }
}

/// Result of annotating a whole document
#[derive(Debug, Clone, Default)]
pub struct DocumentReport {
    /// One report per qualifying sheet, in document order
    pub sheets: Vec<SheetReport>,
    /// Names of sheets the selector left out
    pub skipped: Vec<String>,
}

impl DocumentReport {
    /// Whether any sheet was modified
    pub fn had_changes(&self) -> bool {
        self.sheets.iter().any(|s| s.had_changes)
    }

    /// Total number of changes over all sheets
    pub fn change_count(&self) -> usize {
        self.sheets.iter().map(|s| s.changes.len()).sum()
    }

    /// Total number of row failures over all sheets
    pub fn failure_count(&self) -> usize {
        self.sheets.iter().map(|s| s.failures.len()).sum()
    }

    /// Sheets whose final commit failed
    pub fn commit_errors(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.sheets
            .iter()
            .filter_map(|s| s.commit_error.as_ref().map(|e| (s.sheet.as_str(), e)))
    }

    /// Report for the sheet with the given name
    pub fn sheet(&self, name: &str) -> Option<&SheetReport> {
        self.sheets.iter().find(|s| s.sheet == name)
    }
}

/// Extension trait for Workbook to annotate parameter sheets
pub trait DocumentAnnotateExt {
    /// Annotate with the default selector and options
    fn annotate(&mut self) -> DocumentReport;

    /// Annotate with a custom selector and options
    fn annotate_with_options(
        &mut self,
        selector: &SheetSelector,
        options: &AnnotateOptions,
    ) -> DocumentReport;

    /// Indices of the sheets the selector picks
    fn qualifying_sheets(&self, selector: &SheetSelector) -> Vec<usize>;
}

impl DocumentAnnotateExt for Workbook {
    fn annotate(&mut self) -> DocumentReport {
        self.annotate_with_options(&SheetSelector::default(), &AnnotateOptions::default())
    }

    fn annotate_with_options(
        &mut self,
        selector: &SheetSelector,
        options: &AnnotateOptions,
    ) -> DocumentReport {
        let mut report = DocumentReport::default();

        for index in 0..self.sheet_count() {
            let Some(mut handle) = self.handle(index) else {
                continue;
            };
            let name = handle.sheet_name().to_string();
            if !selector.matches(&name) {
                trace!(sheet = %name, %selector, "sheet not selected");
                report.skipped.push(name);
                continue;
            }
            report.sheets.push(annotate_sheet(&mut handle, options));
        }

        info!(
            sheets = report.sheets.len(),
            changes = report.change_count(),
            failures = report.failure_count(),
            "document annotated"
        );
        report
    }

    fn qualifying_sheets(&self, selector: &SheetSelector) -> Vec<usize> {
        self.worksheets()
            .enumerate()
            .filter(|(_, ws)| selector.matches(ws.name()))
            .map(|(index, _)| index)
            .collect()
    }
}
