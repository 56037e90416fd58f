//! Application error types.
//!
//! Every failure leaves the API as `{ "success": false, "message", "error" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::models::ValidationError;

/// Postgres SQLSTATE codes that mean the client sent bad data.
const CLIENT_DATA_SQLSTATES: &[&str] = &[
    "22021", // character_not_in_repertoire
    "22P02", // invalid_text_representation
    "22003", // numeric_value_out_of_range
    "23502", // not_null_violation
    "23505", // unique_violation
    "23514", // check_violation
];

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}: {detail}")]
    BadRequest {
        message: &'static str,
        detail: String,
    },

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Timeout(&'static str),

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl AppError {
    /// Shorthand for a 400 with an operation message and detail.
    pub fn bad_request(message: &'static str, detail: impl Into<String>) -> Self {
        AppError::BadRequest {
            message,
            detail: detail.into(),
        }
    }

    /// Classify a failed admin write.
    ///
    /// Validation errors and constraint violations become 400; anything else
    /// (connectivity, pool exhaustion) stays a 500.
    pub fn from_write(message: &'static str, err: anyhow::Error) -> Self {
        let client_fault = err.chain().any(|cause| {
            if cause.downcast_ref::<ValidationError>().is_some() {
                return true;
            }
            match cause.downcast_ref::<sqlx::Error>() {
                Some(sqlx::Error::Database(db)) => db
                    .code()
                    .is_some_and(|code| CLIENT_DATA_SQLSTATES.contains(&&*code)),
                _ => false,
            }
        });

        if client_fault {
            let detail = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<ValidationError>())
                .map(ToString::to_string)
                .unwrap_or_else(|| root_cause(&err));
            AppError::BadRequest { message, detail }
        } else {
            AppError::Internal {
                message,
                source: err,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn root_cause(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::NotFound(message)
            | AppError::Unauthorized(message)
            | AppError::Forbidden(message)
            | AppError::Timeout(message) => ErrorBody {
                success: false,
                message: (*message).to_string(),
                error: None,
            },
            AppError::BadRequest { message, detail } => ErrorBody {
                success: false,
                message: (*message).to_string(),
                error: Some(detail.clone()),
            },
            AppError::Internal { message, source } => {
                tracing::error!(error = %format!("{source:#}"), "{message}");
                ErrorBody {
                    success: false,
                    message: (*message).to_string(),
                    error: Some(root_cause(source)),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Attach an operation message to a fallible call, yielding a 500 on error.
pub trait ResultExt<T> {
    fn or_internal(self, message: &'static str) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn or_internal(self, message: &'static str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal {
            message,
            source: e.into(),
        })
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
