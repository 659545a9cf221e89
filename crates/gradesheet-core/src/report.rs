//! Student-facing feedback report.
//!
//! The report lists every applied deduction under its category label, with
//! the checked criteria beneath it. Text blocks are interleaved by position
//! and have their `%t` / `%m` placeholders filled in.

use serde::Serialize;

use crate::format::format_magnitude;
use crate::model::{Deduction, Document, TextBlock};

/// Render the feedback text returned to the graded party.
pub fn render_report(doc: &Document) -> String {
    let mut out = String::new();
    let blocks = doc.text_blocks();
    let mut next = 0;
    let no_submission = doc.is_no_submission();

    for (i, category) in doc.graded_categories().iter().enumerate() {
        while next < blocks.len() && blocks[next].precedes <= i {
            push_block(&mut out, &blocks[next], doc);
            next += 1;
        }
        if no_submission {
            continue;
        }

        out.push_str(&category.label);
        out.push('\n');
        for deduction in category.deductions() {
            push_deduction(&mut out, deduction);
        }
        out.push('\n');
    }

    // A missing submission replaces the whole breakdown.
    if let Some(sentinel) = doc
        .sentinel()
        .and_then(|c| c.deductions().first())
        .filter(|_| no_submission)
    {
        out.push_str(&format!(
            "{} {}\n\n",
            format_magnitude(-doc.maximum_points()),
            sentinel.label()
        ));
    }

    let notes = doc.notes().trim_end();
    if !notes.is_empty() {
        out.push_str(&format!("Note: {notes}\n\n"));
    }

    for block in &blocks[next..] {
        push_block(&mut out, block, doc);
    }

    out
}

fn push_block(out: &mut String, block: &TextBlock, doc: &Document) {
    out.push_str(&interpolate(
        &block.text,
        doc.total_points(),
        doc.maximum_points(),
    ));
    out.push('\n');
}

fn push_deduction(out: &mut String, deduction: &Deduction) {
    let value = deduction.recorded();
    if value == 0.0 {
        return;
    }
    out.push_str(&format!(
        "  {} {}\n",
        format_magnitude(value),
        deduction.label()
    ));
    for criterion in deduction.criteria().iter().filter(|c| c.checked) {
        out.push_str(&format!("    {}\n", criterion.label));
    }
}

/// Replace `%t` with the total and `%m` with the maximum.
///
/// Any other character after `%` (or a trailing `%`) is kept literally.
pub fn interpolate(text: &str, total: f64, maximum: f64) -> String {
    let mut fragments = text.split('%');
    let mut out = fragments.next().unwrap_or_default().to_string();

    for fragment in fragments {
        let mut chars = fragment.chars();
        let value = match chars.next() {
            Some('t') => total,
            Some('m') => maximum,
            _ => {
                out.push('%');
                out.push_str(fragment);
                continue;
            }
        };
        out.push_str(&format_magnitude(value));
        out.push_str(chars.as_str());
    }

    out
}

/// Machine-readable overview of a scored sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub total: f64,
    pub maximum: f64,
    pub no_submission: bool,
    pub categories: Vec<CategorySummary>,
}

/// Applied deductions for one graded category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub label: String,
    pub value: f64,
    /// Sum of the applied deductions (non-positive).
    pub deducted: f64,
    pub applied: Vec<AppliedDeduction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedDeduction {
    pub label: String,
    pub value: f64,
    pub criteria: Vec<String>,
}

impl ScoreSummary {
    pub fn from_document(doc: &Document) -> Self {
        let categories = doc
            .graded_categories()
            .iter()
            .map(|category| {
                let applied: Vec<AppliedDeduction> = category
                    .deductions()
                    .iter()
                    .filter(|d| d.recorded() != 0.0)
                    .map(|d| AppliedDeduction {
                        label: d.label().to_string(),
                        value: d.recorded(),
                        criteria: d
                            .criteria()
                            .iter()
                            .filter(|c| c.checked)
                            .map(|c| c.label.clone())
                            .collect(),
                    })
                    .collect();
                CategorySummary {
                    label: category.label.clone(),
                    value: category.value,
                    deducted: applied.iter().map(|a| a.value).sum(),
                    applied,
                }
            })
            .collect();

        Self {
            total: doc.total_points(),
            maximum: doc.maximum_points(),
            no_submission: doc.is_no_submission(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use crate::parser::{load_saved_sheet, load_template};

    const STYLE: &str = "\
CAT [10] Style
\tDED [O] [-2, -5] Formatting
\t\tCRT [O] Indentation
\t\tCRT [O] Naming
\tDED [O] [-1] Missing header comment
CAT [0] No submission
\tDED [O] [-10] No submission
";

    #[test]
    fn both_criteria_checked() {
        let mut doc = load_template(STYLE).unwrap();
        doc.toggle_criterion(Coordinate::new(0, 0, 0), true).unwrap();
        let total = doc.toggle_criterion(Coordinate::new(0, 0, 1), true).unwrap();
        assert_eq!(total, doc.maximum_points() - 5.0);

        assert_eq!(
            render_report(&doc),
            "Style\n  -5 Formatting\n    Indentation\n    Naming\n\n"
        );
    }

    #[test]
    fn zero_value_deductions_are_omitted() {
        let doc = load_template(STYLE).unwrap();
        assert_eq!(render_report(&doc), "Style\n\n");
    }

    #[test]
    fn only_checked_criteria_listed() {
        let mut doc = load_template(STYLE).unwrap();
        doc.toggle_criterion(Coordinate::new(0, 0, 1), true).unwrap();
        doc.toggle_criterion(Coordinate::new(0, 1, 0), true).unwrap();
        assert_eq!(
            render_report(&doc),
            "Style\n  -2 Formatting\n    Naming\n  -1 Missing header comment\n\n"
        );
    }

    #[test]
    fn no_submission_overrides_breakdown() {
        let sheet = "\
CAT [50] Work
\tDED [X] [-5] Sloppy
CAT [0] No Submission
\tDED [X] [-50] No Submission
";
        let doc = load_saved_sheet(sheet).unwrap();
        assert_eq!(doc.maximum_points(), 50.0);
        assert_eq!(render_report(&doc).trim_end(), "-50 No Submission");
    }

    #[test]
    fn text_blocks_notes_and_placeholders() {
        let sheet = "\
STR Part 1 feedback
CAT [10] Style
\tDED [X] [-1.5] Formatting
CAT [5] Docs
STR Total: %t / %m (100%)
CAT [0] No submission
\tDED [O] [-15] No submission

NOTES
Nice structure.
";
        let doc = load_saved_sheet(sheet).unwrap();
        assert_eq!(
            render_report(&doc),
            "Part 1 feedback\nStyle\n  -1.5 Formatting\n\nDocs\n\n\
             Note: Nice structure.\n\nTotal: 13.5 / 15 (100%)\n"
        );
    }

    #[test]
    fn interpolation_rules() {
        assert_eq!(interpolate("%t/%m", 7.5, 10.0), "7.5/10");
        assert_eq!(interpolate("Score: %tpts", 4.05, 5.0), "Score: 4.05pts");
        assert_eq!(interpolate("no tokens", 1.0, 2.0), "no tokens");
        assert_eq!(interpolate("50%", 1.0, 2.0), "50%");
        assert_eq!(interpolate("%x and %m", 1.0, 2.0), "%x and 2");
        assert_eq!(interpolate("%%t", 1.0, 2.0), "%1");
    }

    #[test]
    fn summary_lists_applied_deductions() {
        let mut doc = load_template(STYLE).unwrap();
        doc.toggle_criterion(Coordinate::new(0, 0, 0), true).unwrap();
        doc.toggle_criterion(Coordinate::new(0, 1, 0), true).unwrap();

        let summary = ScoreSummary::from_document(&doc);
        assert_eq!(summary.total, 7.0);
        assert_eq!(summary.maximum, 10.0);
        assert!(!summary.no_submission);
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].deducted, -3.0);
        assert_eq!(summary.categories[0].applied[0].criteria, vec!["Indentation"]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["categories"][0]["label"], "Style");
    }
}
