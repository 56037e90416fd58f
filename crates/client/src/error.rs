//! Client error types.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a failure envelope.
    #[error("{status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        detail: Option<String>,
    },
}

impl ClientError {
    /// HTTP status of an API failure, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            ClientError::Url(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// `{ "success": false, "message", "error" }`
#[derive(Debug, Deserialize)]
pub(crate) struct FailureBody {
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl FailureBody {
    /// Build an API error from a response body, falling back to the raw text.
    pub(crate) fn into_error(status: StatusCode, body: &str) -> ClientError {
        match serde_json::from_str::<FailureBody>(body) {
            Ok(failure) => ClientError::Api {
                status,
                message: failure.message,
                detail: failure.error,
            },
            Err(_) => ClientError::Api {
                status,
                message: body.trim().to_string(),
                detail: None,
            },
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
