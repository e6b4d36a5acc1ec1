//! Application error type and its HTTP rendering.
//!
//! Every failure that can reach a client is an [`AppError`]. Each variant carries a
//! human-readable message plus structured JSON details, and is rendered as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": { "code": "abc123" } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description embedded in error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is missing or malformed.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No link is stored under the requested code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The requested (custom or generated) code is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The link exists but its expiry has passed. Only surfaced on redirect.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// No free generated code was found within the retry budget.
    #[error("{message}")]
    ExhaustedRetries { message: String, details: Value },

    /// The persistence collaborator failed.
    #[error("{message}")]
    Storage { message: String, details: Value },

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

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedRetries {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for a duplicate-key failure.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// HTTP status used when this error is returned to a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Expired { .. } => StatusCode::GONE,
            Self::ExhaustedRetries { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Expired { .. } => "expired",
            Self::ExhaustedRetries { .. } => "code_space_exhausted",
            Self::Storage { .. } => "storage_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its serializable description.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Conflict { message, details }
            | Self::Expired { message, details }
            | Self::ExhaustedRetries { message, details }
            | Self::Storage { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, details = ?self.to_error_info().details, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::not_found("Record not found", json!({}));
        }

        AppError::storage("Database error", json!({ "reason": e.to_string() }))
    }
}

/// Malformed bodies, wrong content types and missing fields all answer 400 in the
/// usual error shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
