//! gradesheet-core: the score-sheet model, its grammar, scoring and serializers.
//!
//! A score sheet is parsed from a rubric template or a previous save file,
//! edited one checkbox at a time while the running total is kept in step,
//! and written back out as a student-facing report and a lossless save file.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod report;
pub mod save;
pub mod scoring;
pub mod session;

pub use error::{SheetError, SheetResult};
pub use format::format_magnitude;
pub use model::{Category, Coordinate, Criterion, Deduction, Document, TextBlock};
pub use parser::{load_saved_sheet, load_template, parse_sheet};
pub use report::render_report;
pub use save::render_save_file;
pub use session::GradingSession;
