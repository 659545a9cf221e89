//! The `gradesheet grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use gradesheet_core::format::format_magnitude;
use gradesheet_core::model::Coordinate;
use gradesheet_core::GradingSession;

pub fn execute(
    part_name: String,
    dir: PathBuf,
    events: Vec<(String, bool)>,
    notes: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = gradesheet_core::config::load_config_from(config_path.as_deref())?;
    let part = config.part(&part_name).with_context(|| {
        format!(
            "unknown assignment part '{part_name}' (configured: {})",
            config.part_names().join(", ")
        )
    })?;

    // Parse every coordinate before touching the sheet.
    let events = events
        .iter()
        .map(|(raw, checked)| {
            raw.parse::<Coordinate>()
                .map(|at| (at, *checked))
                .map_err(anyhow::Error::msg)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut session = GradingSession::open_in(part, &dir)
        .with_context(|| format!("failed to open score sheet in {}", dir.display()))?;

    for (at, checked) in events {
        let action = if checked { "check" } else { "uncheck" };
        let total = session
            .toggle(at, checked)
            .with_context(|| format!("failed to {action} {at}"))?;
        tracing::info!(%at, checked, total, "applied checkbox");
    }

    if let Some(notes) = notes {
        session.set_notes(notes);
    }

    session.save()?;

    let doc = session.document();
    println!(
        "{}: {} / {}",
        part.name,
        format_magnitude(doc.total_points()),
        format_magnitude(doc.maximum_points())
    );
    println!("Report: {}", session.report_path().display());
    println!("Save file: {}", session.save_path().display());

    Ok(())
}

/// `--check` / `--uncheck` values in the order they appeared on the command line.
pub fn ordered_events(matches: &ArgMatches) -> Vec<(String, bool)> {
    let mut events = Vec::new();
    for (id, checked) in [("check", true), ("uncheck", false)] {
        if let (Some(indices), Some(values)) =
            (matches.indices_of(id), matches.get_many::<String>(id))
        {
            events.extend(indices.zip(values).map(|(i, v)| (i, v.clone(), checked)));
        }
    }
    events.sort_by_key(|(index, _, _)| *index);
    events.into_iter().map(|(_, v, checked)| (v, checked)).collect()
}
