//! Score-sheet error types.
//!
//! Every failure the core can report falls into one of three families:
//! grammar errors from the parser, integrity errors from scoring and toggle
//! dispatch, and I/O errors from the load/save entry points. None of them is
//! ever downgraded to a default value.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Coordinate;

/// Errors that can occur while loading, scoring or saving a score sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A line could not be classified or one of its fields is malformed.
    #[error("line {line}: {message}")]
    Grammar { line: usize, message: String },

    /// A deduction was scored without any penalty magnitudes.
    #[error("deduction '{label}' has an empty mapping")]
    EmptyMapping { label: String },

    /// A category index that is not in the document.
    #[error("no category at index {0}")]
    NoSuchCategory(usize),

    /// A toggle event named a criterion that is not in the document.
    #[error("no criterion at {coordinate}")]
    NoSuchCoordinate { coordinate: Coordinate },

    /// Mapping positions are one-based; position 0 does not exist.
    #[error("mapping position must be at least 1, got {0}")]
    InvalidMappingPosition(usize),

    /// A template or save file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SheetError {
    pub(crate) fn grammar(line: usize, message: impl Into<String>) -> Self {
        SheetError::Grammar {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` for structural problems in the sheet text.
    pub fn is_grammar(&self) -> bool {
        matches!(self, SheetError::Grammar { .. })
    }

    /// Returns `true` when the in-memory model and its caller disagree.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            SheetError::EmptyMapping { .. }
                | SheetError::NoSuchCategory(_)
                | SheetError::NoSuchCoordinate { .. }
                | SheetError::InvalidMappingPosition(_)
        )
    }
}

pub type SheetResult<T> = Result<T, SheetError>;
