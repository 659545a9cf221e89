//! Grading session: one score sheet for one graded subject.
//!
//! The session is the only place the core touches the filesystem. It opens
//! the save file next to the report if one exists, otherwise the part's blank
//! template, and writes both artifacts back on save.

use std::path::{Path, PathBuf};

use crate::config::AssignmentPart;
use crate::error::{SheetError, SheetResult};
use crate::model::{Coordinate, Document};
use crate::parser::{load_saved_sheet, load_template};
use crate::report::render_report;
use crate::save::render_save_file;

/// Extension of the machine-readable save file.
pub const SAVE_EXTENSION: &str = "ss";

#[derive(Debug)]
pub struct GradingSession {
    report_path: PathBuf,
    document: Document,
}

impl GradingSession {
    /// Open the sheet for the subject whose report lives at `report_path`.
    pub fn open(part: &AssignmentPart, report_path: impl Into<PathBuf>) -> SheetResult<Self> {
        let report_path = report_path.into();
        let document = load_document(part, &report_path)?;
        Ok(Self {
            report_path,
            document,
        })
    }

    /// Open the sheet for the subject in `dir`, using the part's report file name.
    pub fn open_in(part: &AssignmentPart, dir: &Path) -> SheetResult<Self> {
        Self::open(part, dir.join(&part.grade_file))
    }

    /// Discard the current sheet and open another subject's.
    ///
    /// If loading fails the current sheet is kept.
    pub fn reset(
        &mut self,
        part: &AssignmentPart,
        report_path: impl Into<PathBuf>,
    ) -> SheetResult<()> {
        let report_path = report_path.into();
        self.document = load_document(part, &report_path)?;
        self.report_path = report_path;
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    pub fn save_path(&self) -> PathBuf {
        save_path_for(&self.report_path)
    }

    /// Apply one checkbox event and return the new total.
    pub fn toggle(&mut self, at: Coordinate, checked: bool) -> SheetResult<f64> {
        self.document.toggle_criterion(at, checked)
    }

    pub fn notes(&self) -> &str {
        self.document.notes()
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.document.set_notes(notes);
    }

    /// Write the feedback report and the save file.
    pub fn save(&self) -> SheetResult<()> {
        write_text_file(&self.report_path, &render_report(&self.document))?;
        write_text_file(&self.save_path(), &render_save_file(&self.document))?;
        tracing::debug!(
            report = %self.report_path.display(),
            total = self.document.total_points(),
            "saved score sheet"
        );
        Ok(())
    }
}

/// Save file path belonging to a report path.
pub fn save_path_for(report_path: &Path) -> PathBuf {
    report_path.with_extension(SAVE_EXTENSION)
}

fn load_document(part: &AssignmentPart, report_path: &Path) -> SheetResult<Document> {
    let saved = save_path_for(report_path);
    if saved.exists() {
        tracing::debug!(path = %saved.display(), "resuming saved sheet");
        load_saved_sheet(&read_text_file(&saved)?)
    } else {
        tracing::debug!(
            path = %part.template.display(),
            part = %part.name,
            "starting from template"
        );
        load_template(&read_text_file(&part.template)?)
    }
}

fn read_text_file(path: &Path) -> SheetResult<String> {
    std::fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a whole text buffer to `path`.
pub fn write_text_file(path: &Path, text: &str) -> SheetResult<()> {
    std::fs::write(path, text).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
