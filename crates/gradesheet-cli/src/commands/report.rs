//! The `gradesheet report` command.

use std::path::PathBuf;

use anyhow::Result;

use gradesheet_core::report::render_report;
use gradesheet_core::save::render_save_file;
use gradesheet_core::session::{save_path_for, write_text_file};

pub fn execute(sheet: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let doc = gradesheet_core::parser::load_sheet_file(&sheet)?;
    let report = render_report(&doc);

    match output {
        Some(path) => {
            let save_path = save_path_for(&path);
            write_text_file(&path, &report)?;
            write_text_file(&save_path, &render_save_file(&doc))?;
            println!("Report written to {}", path.display());
            println!("Save file written to {}", save_path.display());
        }
        None => print!("{report}"),
    }

    Ok(())
}
