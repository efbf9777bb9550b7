//! Portal Error Types
//!
//! Integrates with the unified `kernel::error::AppError` system, like the
//! auth crate's errors.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type PortalResult<T> = Result<T, PortalError>;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Module not found")]
    ModuleNotFound,

    #[error("Post not found")]
    PostNotFound,

    /// Request failed validation. Carries the user-facing error.
    #[error("{0}")]
    InvalidInput(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PortalError::ModuleNotFound | PortalError::PostNotFound => ErrorKind::NotFound,
            PortalError::InvalidInput(inner) => inner.kind(),
            PortalError::Database(_) | PortalError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side failures get a generic message.
    pub fn into_app_error(self) -> AppError {
        match self {
            PortalError::InvalidInput(inner) => inner,
            PortalError::Database(err) => {
                let mapped = AppError::from(err);
                if mapped.is_server_error() {
                    AppError::new(mapped.kind(), "Internal server error")
                } else {
                    mapped
                }
            }
            PortalError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            PortalError::Database(e) => {
                tracing::error!(error = %e, "Portal database error");
            }
            PortalError::Internal(msg) => {
                tracing::error!(message = %msg, "Portal internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Portal error");
            }
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for PortalError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            PortalError::Internal(err.to_string())
        } else {
            PortalError::InvalidInput(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PortalError::ModuleNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PortalError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PortalError::InvalidInput(AppError::bad_request("x")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PortalError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PortalError::ModuleNotFound.into_app_error().message(),
            "Module not found"
        );
        assert_eq!(
            PortalError::Internal("pool exhausted at 10.0.0.3".into())
                .into_app_error()
                .message(),
            "Internal server error"
        );
        assert_eq!(
            PortalError::Database(sqlx::Error::PoolTimedOut)
                .into_app_error()
                .message(),
            "Internal server error"
        );
    }
}
