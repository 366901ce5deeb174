//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Operator not found
    #[error("Operator not found")]
    OperatorNotFound,

    /// Operator name already exists
    #[error("Operator name already exists")]
    OperatorNameTaken,

    /// Invalid credentials (wrong name or password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Too many sign-in attempts from this client
    ///
    /// Not a fault: the expected outcome of the fixed-window rate limiter.
    #[error("Too many sign-in attempts")]
    RateLimited {
        /// When the client's window ends (ms epoch)
        reset_at_ms: i64,
    },

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Session fingerprint mismatch
    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::OperatorNotFound => StatusCode::NOT_FOUND,
            AuthError::OperatorNameTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::SessionInvalid | AuthError::SessionFingerprintMismatch => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::MissingHeader(_) | AuthError::PasswordValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::OperatorNotFound => ErrorKind::NotFound,
            AuthError::OperatorNameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::RateLimited { .. } => ErrorKind::TooManyRequests,
            AuthError::MissingHeader(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::RateLimited { .. } => AppError::new(self.kind(), self.to_string())
                .with_action("Wait for the window to reset and try again"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::RateLimited { reset_at_ms } => {
                tracing::warn!(reset_at_ms, "Sign-in attempt rejected by rate limiter");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        if let AuthError::RateLimited { reset_at_ms } = &self {
            // Tell well-behaved clients when to come back
            let now_ms = chrono::Utc::now().timestamp_millis();
            let retry_after_secs = ((reset_at_ms - now_ms).max(0) + 999) / 1000;

            let mut response = self.to_app_error().into_response();
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
            return response;
        }

        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RateLimited { reset_at_ms: 0 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MissingHeader("User-Agent".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_rate_limited_response_has_retry_after() {
        let reset_at_ms = chrono::Utc::now().timestamp_millis() + 60_000;
        let response = AuthError::RateLimited { reset_at_ms }.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap();
        assert!(retry_after > 0 && retry_after <= 61);
    }
}
