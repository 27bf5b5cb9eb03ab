//! Scanner behaviour against a call-recording fake grid

mod common;

use common::{addr, FakeGrid, Op};
use paramsheet_annotate::{
    annotate_sheet, AnnotateOptions, Change, FailedAction, StopReason, StyleFamily,
};
use paramsheet_core::Rgba;
use pretty_assertions::assert_eq;

fn bindings_only() -> AnnotateOptions {
    AnnotateOptions::bindings_only()
}

// ==================== Termination ====================

#[test]
fn test_blank_run_stops_before_row_eleven() {
    let mut grid = FakeGrid::with_text(&[("A11", "width"), ("B11", "10 mm")]);

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert_eq!(report.stop, StopReason::BlankRun { last_row: 10 });
    assert_eq!(report.rows_scanned, 10);
    assert!(!report.had_changes);
    assert!(grid.ops.is_empty());
    assert!(!grid.read_log().contains(&addr("A11")));
}

#[test]
fn test_blank_run_resets_on_non_blank_row() {
    let mut grid = FakeGrid::with_text(&[("A1", "Params"), ("A10", "free text"), ("A19", "width")]);

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(grid.binding_of("B19"), Some("width"));
    assert_eq!(report.stop, StopReason::BlankRun { last_row: 29 });
}

#[test]
fn test_whitespace_and_empty_text_count_as_blank() {
    let mut grid = FakeGrid::new();
    for row in 1..=5 {
        grid.text.insert(addr(&format!("A{row}")), "   ".into());
    }
    for row in 6..=10 {
        grid.text.insert(addr(&format!("A{row}")), String::new());
    }
    grid.text.insert(addr("A11"), "width".into());

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(report.stop, StopReason::BlankRun { last_row: 10 });
    assert_eq!(grid.binding_of("B11"), None);
}

#[test]
fn test_unreadable_name_cells_count_as_blank() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("A12", "height")]);
    for row in 2..=11 {
        grid.unreadable.insert(addr(&format!("A{row}")));
    }

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(report.stop, StopReason::BlankRun { last_row: 11 });
    assert!(report.failures.is_empty());
    assert_eq!(grid.binding_of("B1"), Some("width"));
    assert_eq!(grid.binding_of("B12"), None);
}

#[test]
fn test_configurable_blank_run_limit() {
    let mut grid = FakeGrid::with_text(&[("A4", "width")]);
    let options = AnnotateOptions {
        blank_run_limit: 3,
        ..bindings_only()
    };

    let report = annotate_sheet(&mut grid, &options);

    assert_eq!(report.stop, StopReason::BlankRun { last_row: 3 });
    assert_eq!(grid.binding_of("B4"), None);
}

#[test]
fn test_terminator_stops_before_value_cell() {
    let mut grid = FakeGrid::with_text(&[
        ("A1", "width"),
        ("A2", "--END--"),
        ("B2", "5 mm"),
        ("C2", "[calc]"),
        ("A3", "height"),
    ]);

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert_eq!(report.stop, StopReason::Terminator { row: 2 });
    assert_eq!(report.rows_scanned, 2);
    assert_eq!(grid.binding_of("B1"), Some("width"));
    assert_eq!(grid.binding_of("B3"), None);

    let reads = grid.read_log();
    assert!(!reads.contains(&addr("B2")));
    assert!(!reads.contains(&addr("C2")));
    assert!(!reads.contains(&addr("A3")));
}

#[test]
fn test_terminator_variants() {
    for marker in ["--", "-----", "-- end of parameters"] {
        let mut grid = FakeGrid::with_text(&[("A1", marker), ("A2", "width")]);
        let report = annotate_sheet(&mut grid, &bindings_only());
        assert_eq!(report.stop, StopReason::Terminator { row: 1 }, "{marker}");
        assert!(grid.ops.is_empty());
    }
}

// ==================== Classification ====================

#[test]
fn test_rejected_and_other_rows_are_skipped() {
    let mut grid = FakeGrid::with_text(&[
        ("A1", "Params"),
        ("A2", "B12"),
        ("A3", "wall thickness"),
        ("A4", "depth"),
        ("A5", "AA7"),
    ]);

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(
        report.changes,
        vec![Change::BindingCreated {
            cell: addr("B4"),
            name: "depth".into(),
        }]
    );
    assert_eq!(grid.bindings.len(), 1);
}

#[test]
fn test_name_is_trimmed_but_case_kept() {
    let mut grid = FakeGrid::with_text(&[("A1", "  Wall_T  ")]);

    annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(grid.binding_of("B1"), Some("Wall_T"));
}

// ==================== Binding reconciliation ====================

#[test]
fn test_existing_binding_is_a_no_op() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("A2", "height")]);
    grid.bind("B1", "width");
    grid.bind("B2", "height");

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert!(!report.had_changes);
    assert!(report.lines().is_empty());
    assert!(grid.ops.is_empty());
}

#[test]
fn test_create_binding_commits_once_at_end() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("A2", "height")]);

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert!(report.had_changes);
    assert_eq!(
        grid.ops,
        vec![
            Op::SetBinding("B1".into(), "width".into()),
            Op::SetBinding("B2".into(), "height".into()),
            Op::Commit,
        ]
    );
    assert_eq!(
        report.lines(),
        vec!["B1: alias 'width' set", "B2: alias 'height' set"]
    );
}

#[test]
fn test_replace_is_clear_commit_set() {
    let mut grid = FakeGrid::with_text(&[("A1", "width")]);
    grid.bind("B1", "w");

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(
        grid.ops,
        vec![
            Op::ClearBinding("B1".into()),
            Op::Commit,
            Op::SetBinding("B1".into(), "width".into()),
            Op::Commit,
        ]
    );
    assert_eq!(
        report.changes,
        vec![Change::BindingReplaced {
            cell: addr("B1"),
            old: "w".into(),
            new: "width".into(),
        }]
    );
    assert_eq!(grid.binding_of("B1"), Some("width"));
}

#[test]
fn test_binding_comparison_is_case_sensitive() {
    let mut grid = FakeGrid::with_text(&[("A1", "width")]);
    grid.bind("B1", "Width");

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(report.binding_changes(), 1);
    assert_eq!(grid.binding_of("B1"), Some("width"));
}

#[test]
fn test_duplicate_binding_is_a_row_failure() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("A2", "height")]);
    grid.foreign_bindings.insert("width".into());

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.cell, addr("B1"));
    assert_eq!(failure.action, FailedAction::SetBinding);
    assert!(failure.error.is_binding_error());

    // Scanning continued
    assert_eq!(grid.binding_of("B2"), Some("height"));
    assert!(report.had_changes);
}

#[test]
fn test_same_name_twice_on_one_sheet() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("A2", "width")]);

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(grid.binding_of("B1"), Some("width"));
    assert_eq!(grid.binding_of("B2"), None);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].cell, addr("B2"));
}

#[test]
fn test_failed_clear_skips_set() {
    let mut grid = FakeGrid::with_text(&[("A1", "width")]);
    grid.bind("B1", "w");
    grid.locked.insert(addr("B1"));

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(grid.ops, vec![Op::ClearBinding("B1".into())]);
    assert_eq!(report.failures[0].action, FailedAction::ClearBinding);
    assert!(!report.had_changes);
    assert_eq!(grid.binding_of("B1"), Some("w"));
}

#[test]
fn test_failed_set_after_clear_reports_cleared() {
    let mut grid = FakeGrid::with_text(&[("A1", "width")]);
    grid.bind("B1", "w");
    grid.foreign_bindings.insert("width".into());

    let report = annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(
        report.changes,
        vec![Change::BindingCleared {
            cell: addr("B1"),
            name: "w".into(),
        }]
    );
    assert_eq!(report.failures.len(), 1);
    assert!(report.had_changes);
    assert_eq!(grid.binding_of("B1"), None);
    assert_eq!(grid.ops.last(), Some(&Op::Commit));
}

// ==================== Units ====================

#[test]
fn test_unit_is_set_and_text_unchanged() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("B1", "12.5 mm")]);

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert_eq!(grid.unit_of("B1"), Some("mm"));
    assert_eq!(grid.text.get(&addr("B1")).map(String::as_str), Some("12.5 mm"));
    assert!(report.changes.contains(&Change::UnitSet {
        cell: addr("B1"),
        unit: "mm".into(),
    }));
}

#[test]
fn test_unsupported_unit_leaves_cell_alone() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("B1", "12.5 furlongs")]);
    grid.bind("B1", "width");

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert!(!report.had_changes);
    assert!(grid.ops.is_empty());
    assert_eq!(grid.unit_of("B1"), None);
}

#[test]
fn test_existing_unit_is_kept() {
    let mut grid = FakeGrid::with_text(&[("A1", "angle"), ("B1", "=90 deg")]);
    grid.bind("B1", "angle");
    grid.units.insert(addr("B1"), "°".into());

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert!(!report.had_changes);
    assert_eq!(grid.unit_of("B1"), Some("°"));
}

#[test]
fn test_unit_pass_can_be_disabled() {
    let mut grid = FakeGrid::with_text(&[("A1", "width"), ("B1", "12.5 mm")]);

    annotate_sheet(&mut grid, &bindings_only());

    assert_eq!(grid.unit_of("B1"), None);
}

// ==================== Styles ====================

#[test]
fn test_calc_tag_applies_style_once() {
    let mut grid = FakeGrid::with_text(&[
        ("A1", "area"),
        ("B1", "=width * height"),
        ("C1", "[calc] derived value"),
    ]);
    grid.bind("B1", "area");

    let first = annotate_sheet(&mut grid, &AnnotateOptions::default());
    assert_eq!(
        first.changes,
        vec![Change::StyleApplied {
            cell: addr("B1"),
            family: StyleFamily::Calculated,
        }]
    );
    assert_eq!(
        grid.backgrounds.get(&addr("B1")),
        Some(&StyleFamily::Calculated.background())
    );
    assert_eq!(
        grid.foregrounds.get(&addr("B1")),
        Some(&StyleFamily::Calculated.foreground())
    );

    let writes_after_first = grid.writes();
    let second = annotate_sheet(&mut grid, &AnnotateOptions::default());
    assert!(!second.had_changes);
    assert_eq!(grid.writes(), writes_after_first);
}

#[test]
fn test_style_within_tolerance_is_not_rewritten() {
    let mut grid = FakeGrid::with_text(&[("A1", "k_spring"), ("C1", "'[Const] spring rate")]);
    grid.bind("B1", "k_spring");
    let target = StyleFamily::Fixed.background();
    grid.backgrounds.insert(
        addr("B1"),
        Rgba::new(target.r + 0.00005, target.g - 0.00005, target.b, target.a),
    );

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert!(!report.had_changes);
    assert!(grid.ops.is_empty());
}

#[test]
fn test_custom_color_tolerance() {
    let near_fixed = |grid: &mut FakeGrid| {
        let target = StyleFamily::Fixed.background();
        grid.backgrounds
            .insert(addr("B1"), Rgba::new(target.r - 0.01, target.g, target.b, target.a));
    };

    // 0.01 off is outside the default tolerance
    let mut grid = FakeGrid::with_text(&[("A1", "k_spring"), ("C1", "[fixed]")]);
    grid.bind("B1", "k_spring");
    near_fixed(&mut grid);
    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());
    assert_eq!(report.lines(), vec!["B1: fixed style applied"]);

    // ...and inside a looser one
    let mut grid = FakeGrid::with_text(&[("A1", "k_spring"), ("C1", "[fixed]")]);
    grid.bind("B1", "k_spring");
    near_fixed(&mut grid);
    let options = AnnotateOptions {
        color_tolerance: 0.02,
        ..AnnotateOptions::default()
    };
    let report = annotate_sheet(&mut grid, &options);
    assert!(!report.had_changes);
    assert!(grid.ops.is_empty());
}

#[test]
fn test_style_switches_family() {
    let mut grid = FakeGrid::with_text(&[("A1", "k_spring"), ("C1", "[fixed]")]);
    grid.bind("B1", "k_spring");
    grid.backgrounds
        .insert(addr("B1"), StyleFamily::Calculated.background());

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert_eq!(report.lines(), vec!["B1: fixed style applied"]);
    assert_eq!(
        grid.backgrounds.get(&addr("B1")),
        Some(&StyleFamily::Fixed.background())
    );
}

#[test]
fn test_untagged_description_has_no_effect() {
    let mut grid = FakeGrid::with_text(&[("A1", "k_spring"), ("C1", "spring rate [calc]")]);
    grid.bind("B1", "k_spring");

    let report = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert!(!report.had_changes);
}

// ==================== Idempotence ====================

#[test]
fn test_second_run_makes_no_changes() {
    let mut grid = FakeGrid::with_text(&[
        ("A1", "Params"),
        ("A2", "width"),
        ("B2", "12.5 mm"),
        ("C2", "[fixed] housing width"),
        ("A3", "angle"),
        ("B3", "45 deg"),
        ("A4", "area"),
        ("B4", "=width * 2"),
        ("C4", "[calculated]"),
        ("A5", "--"),
    ]);
    grid.bind("B3", "ang");

    let first = annotate_sheet(&mut grid, &AnnotateOptions::default());
    assert!(first.had_changes);
    assert_eq!(first.failures, vec![]);

    let ops_after_first = grid.ops.len();
    let second = annotate_sheet(&mut grid, &AnnotateOptions::default());

    assert!(!second.had_changes);
    assert!(second.lines().is_empty());
    assert_eq!(grid.ops.len(), ops_after_first);
}
