// api/error.rs
use rocket::serde::json::serde_json;
use rocket::serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ErrorKind {
    Transport,
    Status,
    Decode,
}

/// Snapshot of a failed fetch, cheap to clone and safe to hand to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<&ApiError> for ErrorInfo {
    fn from(error: &ApiError) -> Self {
        ErrorInfo {
            kind: error.kind(),
            message: error.to_string(),
            status: error.status(),
        }
    }
}
