//! Quotes Error Types
//!
//! This module provides quotation-domain error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quotes-specific result type alias
pub type QuotesResult<T> = Result<T, QuotesError>;

/// Quotes-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum QuotesError {
    /// Customer not found
    #[error("Customer not found")]
    CustomerNotFound,

    /// Product not found
    #[error("Product not found")]
    ProductNotFound,

    /// Quotation not found
    #[error("Quotation not found")]
    QuotationNotFound,

    /// Customer still referenced by quotations
    #[error("Customer has quotations and cannot be deleted")]
    CustomerInUse,

    /// Request payload failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuotesError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuotesError::CustomerNotFound
            | QuotesError::ProductNotFound
            | QuotesError::QuotationNotFound => StatusCode::NOT_FOUND,
            QuotesError::CustomerInUse => StatusCode::CONFLICT,
            QuotesError::Validation(_) => StatusCode::BAD_REQUEST,
            QuotesError::Database(_) | QuotesError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuotesError::CustomerNotFound
            | QuotesError::ProductNotFound
            | QuotesError::QuotationNotFound => ErrorKind::NotFound,
            QuotesError::CustomerInUse => ErrorKind::Conflict,
            QuotesError::Validation(_) => ErrorKind::BadRequest,
            QuotesError::Database(_) | QuotesError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuotesError::Database(e) => {
                tracing::error!(error = %e, "Quotes database error");
            }
            QuotesError::Internal(msg) => {
                tracing::error!(message = %msg, "Quotes internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Quotes error");
            }
        }
    }
}

impl IntoResponse for QuotesError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for QuotesError {
    fn from(err: AppError) -> Self {
        QuotesError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            QuotesError::CustomerNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            QuotesError::QuotationNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(QuotesError::CustomerInUse.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            QuotesError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuotesError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_display() {
        assert!(QuotesError::CustomerNotFound.to_string().contains("Customer"));
        assert!(
            QuotesError::Validation("quantity".into())
                .to_string()
                .contains("quantity")
        );
    }
}
