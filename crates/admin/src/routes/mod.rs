//! HTTP route handlers for the back office.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                        - Welcome banner
//! GET    /about                   - Application description
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (opens a store session)
//!
//! # Customers
//! GET    /customers               - List customers
//! POST   /customers               - Create customer
//! PUT    /customers/{id}          - Replace customer fields
//! DELETE /customers/{id}          - Delete customer (refused while it has orders)
//!
//! # Orders
//! GET    /orders                  - List orders
//! POST   /orders                  - Create order
//! PUT    /orders/{order_id}       - Replace order fields
//! DELETE /orders/{order_id}       - Delete order
//! ```
//!
//! Every resource handler follows the same pipeline: validate the payload
//! against its schema, open a session, run one statement per step, and
//! return a `Result` that [`AppError`] turns into a status code.

pub mod customers;
pub mod health;
pub mod orders;
pub mod pages;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use backoffice_core::{Payload, Schema, ValidationErrors};

use crate::error::AppError;
use crate::state::AppState;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(health::router())
        .merge(customers::router())
        .merge(orders::router())
}

/// Body of every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message for a JSON response.
    #[must_use]
    pub fn json(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_owned(),
        })
    }
}

/// Unwrap a JSON body, turning unparseable input into a validation error.
///
/// Rejections that are not about the JSON itself (wrong content type, body
/// too large) keep their own status.
///
/// # Errors
///
/// Returns `AppError::Validation` if the body is not valid JSON and
/// `AppError::Body` for other rejections.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection @ (JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_))) => {
            tracing::debug!(reason = %rejection.body_text(), "Unparseable request body");
            Err(ValidationErrors::invalid_input().into())
        }
        Err(rejection) => Err(AppError::Body(rejection)),
    }
}

/// Read the request body and load it against `schema`.
///
/// # Errors
///
/// Returns `AppError::Validation` with every field failure, or
/// `AppError::Body` if the body could not be read as JSON at all.
pub fn load_payload<P: Payload>(
    schema: &Schema,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<P, AppError> {
    let value = json_body(payload)?;
    schema.load_as(&value).map_err(|errors| {
        tracing::debug!(
            schema = schema.name(),
            fields = errors.len(),
            "Rejected request payload"
        );
        AppError::Validation(errors)
    })
}
