//! Scan results: change lines, per-row failures and the stop reason

use std::fmt;

use paramsheet_core::{CellAddress, Error};

use crate::tag::StyleFamily;

/// One side effect performed on a value cell
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Binding attached to a previously unbound cell
    BindingCreated { cell: CellAddress, name: String },
    /// Binding removed, and the follow-up set did not happen
    BindingCleared { cell: CellAddress, name: String },
    /// Binding replaced through clear, commit, set
    BindingReplaced {
        cell: CellAddress,
        old: String,
        new: String,
    },
    /// Display unit set from the value text
    UnitSet { cell: CellAddress, unit: String },
    /// Background/foreground pair applied for a description tag
    StyleApplied {
        cell: CellAddress,
        family: StyleFamily,
    },
}

impl Change {
    /// Cell the change was made on
    pub fn cell(&self) -> CellAddress {
        match self {
            Change::BindingCreated { cell, .. }
            | Change::BindingCleared { cell, .. }
            | Change::BindingReplaced { cell, .. }
            | Change::UnitSet { cell, .. }
            | Change::StyleApplied { cell, .. } => *cell,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::BindingCreated { cell, name } => write!(f, "{cell}: alias '{name}' set"),
            Change::BindingCleared { cell, name } => {
                write!(f, "{cell}: alias '{name}' cleared")
            }
            Change::BindingReplaced { cell, old, new } => {
                write!(f, "{cell}: alias '{old}' replaced by '{new}'")
            }
            Change::UnitSet { cell, unit } => write!(f, "{cell}: display unit set to '{unit}'"),
            Change::StyleApplied { cell, family } => write!(f, "{cell}: {family} style applied"),
        }
    }
}

/// Which write failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    /// Attaching the name to the value cell
    SetBinding,
    /// Removing the old name before a rename
    ClearBinding,
    /// Committing between clear and set
    Commit,
    /// Writing the display unit
    SetUnit,
    /// Writing the background/foreground pair
    SetStyle,
}

impl fmt::Display for FailedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailedAction::SetBinding => "set alias",
            FailedAction::ClearBinding => "clear alias",
            FailedAction::Commit => "commit",
            FailedAction::SetUnit => "set display unit",
            FailedAction::SetStyle => "set style",
        };
        f.write_str(s)
    }
}

/// A non-fatal failure on one row
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Cell the write targeted
    pub cell: CellAddress,
    /// Name from column A
    pub name: String,
    /// Which write failed
    pub action: FailedAction,
    /// Error reported by the host
    pub error: Error,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: failed to {} for '{}': {}",
            self.cell, self.action, self.name, self.error
        )
    }
}

/// Why a scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Too many consecutive blank name cells; `last_row` is the final blank row
    BlankRun { last_row: u32 },
    /// Terminator marker found in the name column of `row`
    Terminator { row: u32 },
    /// Ran past the host's last addressable row
    RowLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::BlankRun { last_row } => write!(f, "blank run ending at row {last_row}"),
            StopReason::Terminator { row } => write!(f, "terminator at row {row}"),
            StopReason::RowLimit => write!(f, "row limit"),
        }
    }
}

/// Result of annotating one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    /// Sheet name
    pub sheet: String,
    /// Side effects, in row order
    pub changes: Vec<Change>,
    /// Non-fatal failures, in row order
    pub failures: Vec<RowFailure>,
    /// Number of rows whose name cell was read
    pub rows_scanned: u32,
    /// Why the scan ended
    pub stop: StopReason,
    /// Whether any write took effect
    pub had_changes: bool,
    /// Error from the final commit, if it failed
    pub commit_error: Option<Error>,
}

impl SheetReport {
    /// Number of binding changes (created, cleared or replaced)
    pub fn binding_changes(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Change::BindingCreated { .. }
                        | Change::BindingCleared { .. }
                        | Change::BindingReplaced { .. }
                )
            })
            .count()
    }

    /// All change and failure lines, ordered by row
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<(u32, String)> = self
            .changes
            .iter()
            .map(|c| (c.cell().row, c.to_string()))
            .chain(self.failures.iter().map(|f| (f.cell.row, f.to_string())))
            .collect();
        lines.sort_by_key(|(row, _)| *row);
        lines.into_iter().map(|(_, line)| line).collect()
    }

    /// One-line summary of the scan
    pub fn summary(&self) -> String {
        if self.had_changes {
            format!(
                "{}: {} change(s), {} failure(s), {} rows scanned ({})",
                self.sheet,
                self.changes.len(),
                self.failures.len(),
                self.rows_scanned,
                self.stop
            )
        } else {
            format!(
                "{}: up to date, {} failure(s), {} rows scanned ({})",
                self.sheet,
                self.failures.len(),
                self.rows_scanned,
                self.stop
            )
        }
    }
}
