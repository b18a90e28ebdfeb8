//! Error types for the editor

use std::fmt;
use thiserror::Error;
use wiredit_common::{CommonError, ErrorKind};

/// Direction of a history replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Undo,
    Redo,
}

impl fmt::Display for HistoryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryStep::Undo => f.write_str("undo"),
            HistoryStep::Redo => f.write_str("redo"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("{0}")]
    Validation(String),

    #[error("Nothing to {0}")]
    NoOp(HistoryStep),

    #[error(transparent)]
    FileSystem(#[from] CommonError),
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::Validation(_) => ErrorKind::Validation,
            EditorError::NoOp(_) => ErrorKind::NoOp,
            EditorError::FileSystem(e) => e.kind(),
        }
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
