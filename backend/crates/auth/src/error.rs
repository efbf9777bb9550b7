//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailTaken,

    #[error("Username already exists")]
    UsernameTaken,

    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Admin access required")]
    AdminRequired,

    /// Request failed validation. Carries the user-facing error.
    #[error("{0}")]
    InvalidInput(AppError),

    #[error("Credential derivation failed: {0}")]
    PasswordHashing(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::UsernameTaken => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::InvalidInput(inner) => inner.kind(),
            AuthError::PasswordHashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server-side failures get a generic message.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::InvalidInput(inner) => inner,
            AuthError::EmailTaken => {
                AppError::bad_request("Email already exists").with_action("Log in instead")
            }
            AuthError::UsernameTaken => AppError::bad_request("Username already exists")
                .with_action("Please choose a different username"),
            AuthError::Database(err) => {
                let mapped = AppError::from(err);
                if mapped.is_server_error() {
                    AppError::new(mapped.kind(), "Internal server error")
                } else {
                    mapped
                }
            }
            AuthError::PasswordHashing(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AdminRequired => {
                tracing::warn!("Admin route refused");
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
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::InvalidInput(err)
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AuthError::EmailTaken, StatusCode::BAD_REQUEST),
            (AuthError::UsernameTaken, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::AdminRequired, StatusCode::FORBIDDEN),
            (
                AuthError::InvalidInput(AppError::bad_request("bad")),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::PasswordHashing(PasswordHashError::HashingFailed("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::Database(sqlx::Error::PoolClosed), StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error:?}");
        }
    }

    #[test]
    fn test_messages_match_client_contract() {
        assert_eq!(
            AuthError::EmailTaken.into_app_error().message(),
            "Email already exists"
        );
        assert_eq!(
            AuthError::UsernameTaken.into_app_error().message(),
            "Username already exists"
        );
        assert_eq!(
            AuthError::InvalidCredentials.into_app_error().message(),
            "Invalid credentials"
        );
        assert_eq!(
            AuthError::Unauthenticated.into_app_error().message(),
            "Authentication required"
        );
        assert_eq!(
            AuthError::AdminRequired.into_app_error().message(),
            "Admin access required"
        );
    }

    #[test]
    fn test_server_errors_do_not_leak_detail() {
        let err = AuthError::Internal("connection string postgres://secret".into());
        assert_eq!(err.into_app_error().message(), "Internal server error");

        let err = AuthError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.into_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_from_app_error_keeps_client_errors() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let err: AuthError = AppError::internal("boom").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
