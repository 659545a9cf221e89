//! The `gradesheet show` command.

use std::path::PathBuf;

use anyhow::Result;

use gradesheet_core::format::format_magnitude;
use gradesheet_core::model::{Coordinate, Document};
use gradesheet_core::report::ScoreSummary;

pub fn execute(sheet: PathBuf, format: String) -> Result<()> {
    let doc = gradesheet_core::parser::load_sheet_file(&sheet)?;

    match format.as_str() {
        "json" => {
            let summary = ScoreSummary::from_document(&doc);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "text" => print_boxes(&doc),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_boxes(doc: &Document) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Box", "Category", "Deduction", "Criterion", "", "Value"]);

    for (c, category) in doc.categories().iter().enumerate() {
        for (d, deduction) in category.deductions().iter().enumerate() {
            let value = format_magnitude(deduction.recorded());
            if deduction.is_single_toggle() {
                table.add_row(vec![
                    Cell::new(Coordinate::new(c, d, 0)),
                    Cell::new(&category.label),
                    Cell::new(deduction.label()),
                    Cell::new(""),
                    Cell::new(mark(deduction.checked_count() > 0)),
                    Cell::new(value),
                ]);
                continue;
            }
            for (k, criterion) in deduction.criteria().iter().enumerate() {
                table.add_row(vec![
                    Cell::new(Coordinate::new(c, d, k)),
                    Cell::new(&category.label),
                    Cell::new(deduction.label()),
                    Cell::new(&criterion.label),
                    Cell::new(mark(criterion.checked)),
                    Cell::new(if k == 0 { value.as_str() } else { "" }),
                ]);
            }
        }
    }

    println!("{table}");
    println!(
        "Total: {} / {}{}",
        format_magnitude(doc.total_points()),
        format_magnitude(doc.maximum_points()),
        if doc.is_no_submission() {
            " (no submission)"
        } else {
            ""
        }
    );
}

fn mark(checked: bool) -> &'static str {
    if checked {
        "[X]"
    } else {
        "[ ]"
    }
}
