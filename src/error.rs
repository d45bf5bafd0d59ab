//! Application error type and its HTTP rendering.
//!
//! Every failure leaves the service as the same JSON envelope:
//!
//! ```json
//! {
//!   "message": "Short URL not found: abc",
//!   "status": 404,
//!   "date": "2026-01-15 10:30:00",
//!   "details": null
//! }
//! ```
//!
//! Field-level validation failures carry a `details` map keyed by field name.
//! Internal errors are logged with their cause and rendered with a generic
//! message so storage details never reach the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::dto::date_format::DATE_FORMAT;
use crate::utils::base62::CodecError;

/// Message used when the request body is not valid JSON or a date is malformed.
pub const JSON_PARSE_ERROR: &str = "JSON Parse error.";

/// Message used when one or more request fields fail validation.
pub const VALIDATION_ERROR: &str = "Validation error.";

const INTERNAL_ERROR: &str = "Internal server error";

/// Serialized error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
    pub date: String,
    pub details: Value,
}

/// Error type shared by services, repositories and handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input rejected before or during processing (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Short URL does not exist, has expired, or its code is malformed (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Storage or other infrastructure failure (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Field-level validation failure; `details` maps field name to message.
    pub fn validation(details: Value) -> Self {
        Self::bad_request(VALIDATION_ERROR, details)
    }

    pub fn json_parse() -> Self {
        Self::bad_request(JSON_PARSE_ERROR, Value::Null)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing envelope for this error.
    pub fn to_error_body(&self) -> ErrorBody {
        let status = self.status_code();
        let (message, details) = match self {
            AppError::Validation { message, details } => (message.clone(), details.clone()),
            AppError::NotFound { message, details } => (message.clone(), details.clone()),
            AppError::Internal { .. } => (INTERNAL_ERROR.to_string(), Value::Null),
        };

        ErrorBody {
            message,
            status: status.as_u16(),
            date: Local::now().format(DATE_FORMAT).to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal { message, details } => {
                tracing::error!(%details, "{}", message);
            }
            AppError::NotFound { message, .. } => tracing::debug!("{}", message),
            AppError::Validation { message, details } => {
                tracing::debug!(%details, "{}", message)
            }
        }

        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details: Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .map(|e| match &e.message {
                        Some(m) => m.to_string(),
                        None => e.code.to_string(),
                    })
                    .unwrap_or_default();
                (field.to_string(), Value::String(message))
            })
            .collect();

        AppError::validation(Value::Object(details))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        AppError::json_parse()
    }
}

impl From<CodecError> for AppError {
    fn from(e: CodecError) -> Self {
        AppError::internal("Short code encoding failed", json!({ "reason": e.to_string() }))
    }
}
