//! Error types for the HTTP clients

use std::time::Duration;
use thiserror::Error;
use wiredit_common::ErrorKind;
use wiredit_preview::PreviewError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("Error connecting to server: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with an error envelope or a failed result
    #[error("{detail}")]
    Service { status: Option<u16>, detail: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Transport(_) | ClientError::Timeout(_) => ErrorKind::Transport,
            ClientError::Service { .. } | ClientError::Decode(_) => ErrorKind::Service,
        }
    }

    pub(crate) fn service(detail: impl Into<String>) -> Self {
        ClientError::Service {
            status: None,
            detail: detail.into(),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<ClientError> for PreviewError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(reason) => PreviewError::Transport(reason),
            ClientError::Timeout(after) => PreviewError::Timeout(after),
            other => PreviewError::Service(other.to_string()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
