//! Unified error handling for the back office.
//!
//! Handlers return `Result<_, AppError>`; this is the only place where
//! outcomes become HTTP status codes.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use backoffice_core::ValidationErrors;

use crate::db::RepositoryError;

/// Generic body for store failures. The cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request payload failed its schema.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Request body could not be read as JSON (content type, size).
    #[error("Rejected body: {0}")]
    Body(JsonRejection),

    /// Opening a session or running a statement failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation refused by a referential guard.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Body(rejection) => rejection.status(),
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            Self::Body(rejection) => rejection.into_response(),
            Self::Database(ref cause) => {
                let event_id = sentry::capture_error(cause);
                tracing::error!(
                    error = %cause,
                    sentry_event_id = %event_id,
                    "Store request error"
                );
                // Don't expose internal error details to clients
                (status, Json(json!({ "error": INTERNAL_ERROR_MESSAGE }))).into_response()
            }
            Self::NotFound(message) | Self::Forbidden(message) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Customer not found.".to_string());
        assert_eq!(err.to_string(), "Not found: Customer not found.");

        let err = AppError::Forbidden("has orders".to_string());
        assert_eq!(err.to_string(), "Forbidden: has orders");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation(ValidationErrors::invalid_input())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Unavailable(
                "down".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_is_the_field_map() {
        let errors = ValidationErrors::single("email", "Missing data for required field.");
        let body = body_json(AppError::from(errors).into_response()).await;
        assert_eq!(
            body,
            json!({"email": ["Missing data for required field."]})
        );
    }

    #[tokio::test]
    async fn test_database_error_does_not_leak_cause() {
        let err = AppError::Database(RepositoryError::Unavailable(
            "password authentication failed for user \"bo\"".to_string(),
        ));
        let body = body_json(err.into_response()).await;
        assert_eq!(body, json!({"error": "Internal Server Error"}));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let err = AppError::NotFound("Order not found.".to_string());
        let body = body_json(err.into_response()).await;
        assert_eq!(body, json!({"error": "Order not found."}));
    }
}
