//! Annotation options

use paramsheet_core::style::COLOR_TOLERANCE;

use crate::unit::DEFAULT_UNITS;

/// Consecutive blank name cells that end a scan
pub const DEFAULT_BLANK_RUN_LIMIT: u32 = 10;

/// Options for annotating a sheet
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Stop after this many consecutive blank name cells (default: 10)
    pub blank_run_limit: u32,
    /// Infer display units from value text
    pub units: bool,
    /// Apply style tags from description cells
    pub styles: bool,
    /// Units that may be set as display unit (default: mm, deg, °)
    pub unit_allow_list: Vec<String>,
    /// Per-channel tolerance when checking whether a style is already applied
    pub color_tolerance: f64,
}

impl AnnotateOptions {
    /// Bindings only, no unit or style passes
    pub fn bindings_only() -> Self {
        Self {
            units: false,
            styles: false,
            ..Self::default()
        }
    }
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            blank_run_limit: DEFAULT_BLANK_RUN_LIMIT,
            units: true,
            styles: true,
            unit_allow_list: DEFAULT_UNITS.iter().map(|u| u.to_string()).collect(),
            color_tolerance: COLOR_TOLERANCE,
        }
    }
}
