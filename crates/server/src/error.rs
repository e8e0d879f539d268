//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that maps every failure onto the REST
//! error taxonomy (400/401/404/409/500). Server errors are logged and captured
//! to Sentry before responding; expected outcomes (bad input, bad credentials,
//! missing rows, constraint conflicts) are not logged as errors. All route
//! handlers return `Result<T, AppError>`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Registration or authentication failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Cart aggregation failed.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Credentials missing, malformed, or wrong.
    #[error("invalid credentials")]
    Unauthorized,

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Repository(err)
            | Self::Auth(AuthError::Repository(err))
            | Self::Cart(CartError::Repository(err)) => repository_status(err),
            Self::Auth(err) => match err {
                AuthError::InvalidUsername(_) | AuthError::MissingPassword => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

const fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Validation(_) => StatusCode::BAD_REQUEST,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use restcart_core::{CartEntryId, ItemId, UsernameError};

    use super::*;
    use crate::db::{ConstraintKind, ConstraintViolation};

    fn conflict() -> RepositoryError {
        RepositoryError::Conflict(ConstraintViolation {
            kind: ConstraintKind::Unique,
            constraint: Some("item_name_key".to_string()),
            detail: "duplicate key value".to_string(),
        })
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("item");
        assert_eq!(err.to_string(), "item not found");

        let err = AppError::BadRequest("name required".to_string());
        assert_eq!(err.to_string(), "name required");
    }

    #[test]
    fn test_repository_status_codes() {
        assert_eq!(
            AppError::from(conflict()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(RepositoryError::Validation("no fields".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(RepositoryError::Database(sqlx::Error::PoolTimedOut)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(
            AppError::from(AuthError::InvalidUsername(UsernameError::Empty)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::MissingPassword).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::UserAlreadyExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AuthError::Repository(conflict())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AuthError::PasswordHash).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cart_status_codes() {
        let missing = CartError::MissingItem {
            cart_entry_id: CartEntryId::new(1),
            item_id: ItemId::new(2),
        };
        assert_eq!(
            AppError::from(missing).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_plain_status_codes() {
        assert_eq!(AppError::NotFound("user").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::BadRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_response_hides_internal_details() {
        let response =
            AppError::from(RepositoryError::DataCorruption("connection string leaked".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_client_error_body() {
        let response = AppError::NotFound("item").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "error": "item not found" }));
    }

    #[test]
    fn test_conflict_message_carries_driver_detail() {
        let err = AppError::from(conflict());
        assert!(err.to_string().contains("duplicate key value"));
    }
}
