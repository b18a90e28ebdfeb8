//! Error types for the render pipeline

use std::time::Duration;
use thiserror::Error;
use wiredit_common::ErrorKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("Error connecting to render service: {0}")]
    Transport(String),

    #[error("Render request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Service(String),

    #[error("Could not decode {format} artifact: {reason}")]
    Decode { format: String, reason: String },

    #[error("Unknown diagram format: {0}")]
    UnknownFormat(String),
}

impl PreviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreviewError::Transport(_) | PreviewError::Timeout(_) => ErrorKind::Transport,
            PreviewError::Service(_) | PreviewError::Decode { .. } => ErrorKind::Service,
            PreviewError::UnknownFormat(_) => ErrorKind::Validation,
        }
    }
}

pub type PreviewResult<T> = Result<T, PreviewError>;
