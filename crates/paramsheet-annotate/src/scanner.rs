//! Row scanner and reconciliation loop
//!
//! Rows are visited from 1 upward. Column A holds the name, column B the value
//! that receives the binding, unit and style, and the column right of B holds the
//! description. The scan ends after a run of blank name cells or at a terminator
//! row, whichever comes first.

use paramsheet_core::{CellAddress, SheetAccess, MAX_ROWS};
use tracing::{debug, info, trace, warn};

use crate::classify::{classify, NameClass};
use crate::options::AnnotateOptions;
use crate::report::{Change, FailedAction, RowFailure, SheetReport, StopReason};
use crate::tag::parse_tag;
use crate::unit::extract_unit;

/// Column holding parameter names (A)
pub const NAME_COLUMN: u16 = 0;

/// Column holding parameter values (B)
pub const VALUE_COLUMN: u16 = 1;

/// What to do with a value cell's binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingPlan {
    /// Already bound to the wanted name
    Keep,
    /// Unbound; bind directly
    Create,
    /// Bound to `old`; go `Bound(old) -> Unbound -> Bound(new)` with a commit in between
    Replace { old: String },
}

/// Decide how to reach `wanted` from the cell's `current` binding
pub fn plan_binding(current: Option<&str>, wanted: &str) -> BindingPlan {
    match current {
        Some(name) if name == wanted => BindingPlan::Keep,
        Some(name) => BindingPlan::Replace {
            old: name.to_string(),
        },
        None => BindingPlan::Create,
    }
}

/// Annotate one sheet: bind names, infer units and apply style tags
///
/// Never fails as a whole; write failures are collected in the report.
pub fn annotate_sheet<G>(grid: &mut G, options: &AnnotateOptions) -> SheetReport
where
    G: SheetAccess + ?Sized,
{
    Scanner::new(grid, options).run()
}

struct Scanner<'g, 'o, G: SheetAccess + ?Sized> {
    grid: &'g mut G,
    options: &'o AnnotateOptions,
    changes: Vec<Change>,
    failures: Vec<RowFailure>,
}

impl<'g, 'o, G: SheetAccess + ?Sized> Scanner<'g, 'o, G> {
    fn new(grid: &'g mut G, options: &'o AnnotateOptions) -> Self {
        Self {
            grid,
            options,
            changes: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn run(mut self) -> SheetReport {
        let sheet = self.grid.sheet_name().to_string();
        let mut row: u32 = 1;
        let mut blank_run: u32 = 0;
        let mut rows_scanned: u32 = 0;

        let stop = loop {
            if row > MAX_ROWS {
                break StopReason::RowLimit;
            }
            rows_scanned += 1;

            let name_cell = CellAddress::new(row - 1, NAME_COLUMN);
            let text = match self.grid.read_text(name_cell) {
                Ok(text) => text.unwrap_or_default(),
                Err(e) => {
                    trace!(cell = %name_cell, error = %e, "unreadable name cell counted as blank");
                    String::new()
                }
            };
            let text = text.trim();

            if text.is_empty() {
                blank_run += 1;
                if blank_run >= self.options.blank_run_limit {
                    break StopReason::BlankRun { last_row: row };
                }
                row += 1;
                continue;
            }
            blank_run = 0;

            match classify(text) {
                NameClass::Terminator => break StopReason::Terminator { row },
                NameClass::Rejected => trace!(cell = %name_cell, text, "rejected name"),
                NameClass::Other => trace!(cell = %name_cell, text, "not a parameter name"),
                NameClass::Valid(name) => self.process_row(row, name),
            }
            row += 1;
        };

        let had_changes = !self.changes.is_empty();
        let mut commit_error = None;
        if had_changes {
            if let Err(e) = self.grid.commit() {
                warn!(sheet = %sheet, error = %e, "final commit failed");
                commit_error = Some(e);
            }
        }

        let report = SheetReport {
            sheet,
            changes: self.changes,
            failures: self.failures,
            rows_scanned,
            stop,
            had_changes,
            commit_error,
        };
        info!("{}", report.summary());
        report
    }

    fn process_row(&mut self, row: u32, name: &str) {
        let value_cell = CellAddress::new(row - 1, VALUE_COLUMN);

        self.reconcile_binding(value_cell, name);
        if self.options.units {
            self.apply_unit(value_cell, name);
        }
        if self.options.styles {
            self.apply_style(value_cell, name);
        }
    }

    fn reconcile_binding(&mut self, cell: CellAddress, name: &str) {
        let current = self.grid.binding(cell);
        match plan_binding(current.as_deref(), name) {
            BindingPlan::Keep => trace!(cell = %cell, name, "alias up to date"),
            BindingPlan::Create => {
                if self.try_write(cell, name, FailedAction::SetBinding, |g| {
                    g.set_binding(cell, name)
                }) {
                    self.record(Change::BindingCreated {
                        cell,
                        name: name.to_string(),
                    });
                }
            }
            BindingPlan::Replace { old } => self.replace_binding(cell, old, name),
        }
    }

    /// Clear, commit, then set, so references to the old name fall back to the
    /// cell position before the new name exists.
    fn replace_binding(&mut self, cell: CellAddress, old: String, name: &str) {
        if !self.try_write(cell, name, FailedAction::ClearBinding, |g| {
            g.clear_binding(cell)
        }) {
            return;
        }

        let committed = self.try_write(cell, name, FailedAction::Commit, |g| g.commit());
        let set = committed
            && self.try_write(cell, name, FailedAction::SetBinding, |g| {
                g.set_binding(cell, name)
            });

        if set {
            self.record(Change::BindingReplaced {
                cell,
                old,
                new: name.to_string(),
            });
        } else {
            self.record(Change::BindingCleared { cell, name: old });
        }
    }

    fn apply_unit(&mut self, cell: CellAddress, name: &str) {
        if self
            .grid
            .display_unit(cell)
            .map_or(false, |unit| !unit.is_empty())
        {
            return;
        }

        let Ok(Some(text)) = self.grid.read_text(cell) else {
            return;
        };
        let Some(unit) = extract_unit(&text, &self.options.unit_allow_list[..]) else {
            trace!(cell = %cell, text = %text, "no supported unit in value");
            return;
        };

        if self.try_write(cell, name, FailedAction::SetUnit, |g| {
            g.set_display_unit(cell, unit)
        }) {
            self.record(Change::UnitSet {
                cell,
                unit: unit.to_string(),
            });
        }
    }

    fn apply_style(&mut self, cell: CellAddress, name: &str) {
        let Some(description_cell) = cell.next_column() else {
            return;
        };
        let Ok(Some(description)) = self.grid.read_text(description_cell) else {
            return;
        };
        let Some(family) = parse_tag(&description) else {
            return;
        };

        let current = self.grid.background(cell);
        if current.approx_eq(&family.background(), self.options.color_tolerance) {
            trace!(cell = %cell, %family, "style already applied");
            return;
        }

        if self.try_write(cell, name, FailedAction::SetStyle, |g| {
            g.set_background(cell, family.background())?;
            g.set_foreground(cell, family.foreground())
        }) {
            self.record(Change::StyleApplied { cell, family });
        }
    }

    /// Run one write; on failure record it and return `false`
    fn try_write<F>(&mut self, cell: CellAddress, name: &str, action: FailedAction, write: F) -> bool
    where
        F: FnOnce(&mut G) -> paramsheet_core::Result<()>,
    {
        match write(&mut *self.grid) {
            Ok(()) => true,
            Err(error) => {
                let failure = RowFailure {
                    cell,
                    name: name.to_string(),
                    action,
                    error,
                };
                warn!("{failure}");
                self.failures.push(failure);
                false
            }
        }
    }

    fn record(&mut self, change: Change) {
        debug!("{change}");
        self.changes.push(change);
    }
}
