//! End-to-end score sheet scenarios against the shared rubric templates.
//!
//! These drive the core library the way the CLI does: load a template,
//! apply checkbox events, then render and re-parse both artifacts.

use gradesheet_core::model::{Coordinate, Document};
use gradesheet_core::report::ScoreSummary;
use gradesheet_core::{format_magnitude, load_saved_sheet, load_template};
use gradesheet_core::{render_report, render_save_file, SheetError};

const TEMPLATE: &str = include_str!("../../../templates/style-assignment.txt");
const GRADED: &str = include_str!("../../../templates/graded-sample.ss");

fn template() -> Document {
    load_template(TEMPLATE).unwrap()
}

fn assert_total_invariant(doc: &Document) {
    let expected = doc.maximum_points() + doc.recorded_sum();
    assert!(
        (doc.total_points() - expected).abs() < 1e-9,
        "total {} != maximum {} + recorded {}",
        doc.total_points(),
        doc.maximum_points(),
        doc.recorded_sum()
    );
}

#[test]
fn blank_template_scores_full_marks() {
    let doc = template();
    assert_eq!(doc.maximum_points(), 50.0);
    assert_eq!(doc.total_points(), 50.0);
    assert!(!doc.is_no_submission());
    assert_eq!(
        render_report(&doc),
        "Assignment 3: linked lists\nStyle\n\nCorrectness\n\nTotal: 50 / 50\n"
    );
}

#[test]
fn style_scenario_both_criteria() {
    let mut doc = template();
    doc.toggle_criterion(Coordinate::new(0, 0, 0), true).unwrap();
    let total = doc.toggle_criterion(Coordinate::new(0, 0, 1), true).unwrap();

    assert_eq!(total, doc.maximum_points() - 5.0);
    let report = render_report(&doc);
    assert!(report.contains("Style\n  -5 Formatting\n    Indentation\n    Naming\n\n"));
    assert!(report.ends_with("Total: 45 / 50\n"));
}

#[test]
fn saturating_failing_tests() {
    let mut doc = template();
    let mut totals = Vec::new();
    for k in 0..3 {
        totals.push(doc.toggle_criterion(Coordinate::new(1, 0, k), true).unwrap());
    }
    assert_eq!(totals, vec![40.0, 30.0, 10.0]);

    // Which boxes are checked does not matter, only how many.
    doc.toggle_criterion(Coordinate::new(1, 0, 0), false).unwrap();
    assert_eq!(doc.total_points(), 30.0);
    doc.toggle_criterion(Coordinate::new(1, 0, 2), false).unwrap();
    assert_eq!(doc.total_points(), 40.0);
    assert_total_invariant(&doc);
}

#[test]
fn total_invariant_holds_over_event_sequence() {
    let mut doc = template();
    let events = [
        (Coordinate::new(0, 0, 1), true),
        (Coordinate::new(0, 1, 0), true),
        (Coordinate::new(1, 0, 2), true),
        (Coordinate::new(1, 1, 0), true),
        (Coordinate::new(0, 0, 0), true),
        (Coordinate::new(0, 1, 0), false),
        (Coordinate::new(1, 0, 2), true),
        (Coordinate::new(0, 0, 1), false),
        (Coordinate::new(2, 0, 0), true),
        (Coordinate::new(2, 0, 0), false),
    ];
    for (at, checked) in events {
        doc.toggle_criterion(at, checked).unwrap();
        assert_total_invariant(&doc);
    }
    assert_eq!(format_magnitude(doc.total_points()), "35.5");
}

#[test]
fn bad_event_leaves_total_untouched() {
    let mut doc = template();
    doc.toggle_criterion(Coordinate::new(0, 1, 0), true).unwrap();
    let before = doc.clone();

    let err = doc
        .toggle_criterion(Coordinate::new(5, 0, 0), true)
        .unwrap_err();
    assert!(err.is_integrity());
    let err = doc
        .toggle_criterion(Coordinate::new(0, 1, 1), true)
        .unwrap_err();
    assert!(matches!(err, SheetError::NoSuchCoordinate { .. }));
    assert_eq!(doc, before);
}

#[test]
fn graded_sample_matches_expected_report() {
    let doc = load_saved_sheet(GRADED).unwrap();
    assert_eq!(doc.total_points(), 32.5);
    assert_eq!(
        render_report(&doc),
        "Assignment 3: linked lists\n\
         Style\n  -5 Formatting\n    Indentation\n    Naming\n\n\
         Correctness\n  -10 Failing tests\n    Single element\n  -2.5 Memory leak on clear\n\n\
         Note: Good structure overall; see the comments on clear().\n\n\
         Total: 32.5 / 50\n"
    );
}

#[test]
fn graded_sample_round_trips() {
    let doc = load_saved_sheet(GRADED).unwrap();
    let saved = render_save_file(&doc);
    assert_eq!(saved, GRADED);

    let reparsed = load_saved_sheet(&saved).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn edit_save_resume_cycle() {
    let mut doc = load_saved_sheet(GRADED).unwrap();
    doc.toggle_criterion(Coordinate::new(1, 1, 0), false).unwrap();
    doc.toggle_criterion(Coordinate::new(0, 1, 0), true).unwrap();
    doc.set_notes("Regraded after appeal.\n");

    let resumed = load_saved_sheet(&render_save_file(&doc)).unwrap();
    assert_eq!(resumed.total_points(), 34.0);
    assert_eq!(resumed.notes(), "Regraded after appeal.\n");
    assert_eq!(
        ScoreSummary::from_document(&resumed).categories[0].deducted,
        -6.0
    );
}

#[test]
fn no_submission_override() {
    let mut doc = template();
    let total = doc
        .toggle_criterion(Coordinate::new(2, 0, 0), true)
        .unwrap();
    assert_eq!(total, 0.0);
    assert!(doc.is_no_submission());

    let report = render_report(&doc);
    assert_eq!(
        report,
        "Assignment 3: linked lists\n-50 No submission\n\nTotal: 0 / 50\n"
    );

    let reparsed = load_saved_sheet(&render_save_file(&doc)).unwrap();
    assert!(reparsed.is_no_submission());
    assert_eq!(render_report(&reparsed), report);
}
