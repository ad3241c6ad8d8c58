//! Application error type and its HTTP representation.

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
    success: bool,
    message: String,
    error: ErrorInfo,
}

/// Machine-readable error description embedded in error responses.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub details: Value,
}

/// Errors produced by services, repositories and handlers.
///
/// Client-facing variants (`Validation`, `MethodNotAllowed`, `NotFound`) carry
/// their message to the caller. Server-side variants are logged with their
/// details and answered with a generic 500 body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A uniqueness constraint rejected an insert.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Storage { message: String, details: Value },

    #[error("Short code space exhausted after {attempts} candidates")]
    CollisionExhausted { attempts: u32 },

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

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. }
            | AppError::Storage { .. }
            | AppError::CollisionExhausted { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing error description.
    ///
    /// Server-side errors never expose their details.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { details, .. } => ErrorInfo {
                code: "validation_error",
                details: details.clone(),
            },
            AppError::MethodNotAllowed => ErrorInfo {
                code: "method_not_allowed",
                details: json!({ "allowed": ["POST", "OPTIONS"] }),
            },
            AppError::NotFound { details, .. } => ErrorInfo {
                code: "not_found",
                details: details.clone(),
            },
            _ => ErrorInfo {
                code: "internal_error",
                details: json!({}),
            },
        }
    }

    fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        let body = ErrorBody {
            success: false,
            message: self.public_message(),
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

        AppError::storage("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Content-Type must be application/json".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Invalid JSON body".to_string(),
            JsonRejection::JsonDataError(_) => "Invalid request body".to_string(),
            _ => "Invalid request".to_string(),
        };

        AppError::bad_request(message, json!({ "reason": rejection.body_text() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();

        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        AppError::bad_request(message, json!({ "fields": fields }))
    }
}
