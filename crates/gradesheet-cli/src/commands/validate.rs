//! The `gradesheet validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradesheet_core::format::format_magnitude;

pub fn execute(sheet: PathBuf) -> Result<()> {
    let doc = gradesheet_core::parser::load_sheet_file(&sheet)
        .with_context(|| format!("invalid score sheet: {}", sheet.display()))?;

    let graded = doc.graded_categories();
    let deductions: usize = graded.iter().map(|c| c.deductions().len()).sum();
    println!(
        "Score sheet: {} ({} categories, {deductions} deductions)",
        sheet.display(),
        graded.len(),
    );
    println!("Maximum: {}", format_magnitude(doc.maximum_points()));

    let mut warnings = 0;
    match doc.sentinel().and_then(|c| c.deductions().first()) {
        None => {
            println!("  WARNING: last category has no no-submission deduction");
            warnings += 1;
        }
        Some(sentinel) => {
            let expected = -doc.maximum_points();
            let matches = match sentinel.mapping() {
                [only] => (only - expected).abs() < 1e-9,
                _ => false,
            };
            if !matches {
                let mapping: Vec<String> =
                    sentinel.mapping().iter().map(|m| m.to_string()).collect();
                println!(
                    "  [{}] WARNING: no-submission magnitudes are [{}], expected [{}]",
                    sentinel.label(),
                    mapping.join(", "),
                    format_magnitude(expected)
                );
                warnings += 1;
            }
        }
    }
    for category in graded {
        if category.deductions().is_empty() {
            println!("  [{}] WARNING: category has no deductions", category.label);
            warnings += 1;
        }
    }

    if warnings == 0 {
        println!("Score sheet valid.");
    } else {
        println!("\n{warnings} warning(s) found.");
    }

    Ok(())
}
