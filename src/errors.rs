//! Centralized error handling.
//!
//! Every failure the service reports to a caller is an [`AppError`].
//! User-facing kinds render as a failed envelope with code `400`;
//! infrastructure failures are logged and rendered without details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // User-facing failures
    #[error("Product category not found")]
    CategoryNotFound,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Phone number already exists")]
    DuplicatePhone,

    #[error("Client not found")]
    ClientNotFound,

    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Spreadsheet error")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Failed response envelope
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    code: u16,
    message: String,
}

impl AppError {
    /// Whether the error is caused by the caller's input rather than the system.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::CategoryNotFound
                | AppError::DuplicateEmail
                | AppError::DuplicatePhone
                | AppError::ClientNotFound
                | AppError::Validation(_)
        )
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        if self.is_user_facing() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Spreadsheet(e) => {
                tracing::error!("Spreadsheet error: {:?}", e);
                "The spreadsheet could not be generated".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            code: status.as_u16(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_client_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_client_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::ClientNotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_map_to_bad_request() {
        for err in [
            AppError::CategoryNotFound,
            AppError::DuplicateEmail,
            AppError::DuplicatePhone,
            AppError::ClientNotFound,
            AppError::validation("bad"),
        ] {
            assert!(err.is_user_facing());
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::internal("connection string leaked");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn missing_option_becomes_client_not_found() {
        let missing: Option<u32> = None;
        assert!(matches!(
            missing.ok_or_client_not_found(),
            Err(AppError::ClientNotFound)
        ));
    }
}
