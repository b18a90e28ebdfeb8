use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification shared by every wiredit error type.
///
/// Surfaces decide how to present an error from its kind alone:
/// validation problems are reported immediately, transport and service
/// failures replace the preview (or land in the chat transcript), and
/// `NoOp` is never shown as an error at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad user input (file extension, empty instruction, ...)
    Validation,

    /// Could not reach a remote collaborator, or it timed out
    Transport,

    /// Remote call completed but reported failure
    Service,

    /// Nothing to do (undo/redo at the end of history)
    NoOp,
}

impl ErrorKind {
    /// Whether this kind should be presented to the user as an error
    pub fn is_user_visible(self) -> bool {
        !matches!(self, ErrorKind::NoOp)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Service => "service",
            ErrorKind::NoOp => "no-op",
        };
        f.write_str(label)
    }
}

/// Common error type for filesystem access and generic failures
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl CommonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommonError::NotFound(_) | CommonError::InvalidUtf8(_) => ErrorKind::Validation,
            CommonError::Io(_) | CommonError::Generic(_) => ErrorKind::Transport,
        }
    }
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_is_not_user_visible() {
        assert!(!ErrorKind::NoOp.is_user_visible());
        assert!(ErrorKind::Validation.is_user_visible());
        assert!(ErrorKind::Transport.is_user_visible());
        assert!(ErrorKind::Service.is_user_visible());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::NoOp.to_string(), "no-op");
        assert_eq!(ErrorKind::Service.to_string(), "service");
    }

    #[test]
    fn test_common_error_kinds() {
        assert_eq!(
            CommonError::NotFound("a.yml".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(CommonError::from("boom").kind(), ErrorKind::Transport);
    }
}
