//! The `gradesheet parts` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = gradesheet_core::config::load_config_from(config_path.as_deref())?;

    if config.parts.is_empty() {
        println!("No assignment parts configured. Run `gradesheet init` to create a config file.");
        return Ok(());
    }

    for part in &config.parts {
        println!(
            "{}: template {}, report {}, submissions {}",
            part.name,
            part.template.display(),
            part.grade_file,
            part.submissions
        );
    }

    Ok(())
}
