//! Customer route handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::Value;
use tracing::instrument;

use backoffice_core::{CUSTOMER_SCHEMA, Customer, CustomerId, CustomerInput};

use super::{MessageResponse, load_payload};
use crate::{db, error::AppError, state::AppState};

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            put(update_customer).delete(delete_customer),
        )
}

/// GET /customers - List all customers.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let mut session = state.open_session().await?;
    let customers = session.list_customers().await?;
    db::release(session).await;
    tracing::debug!(count = customers.len(), "Listed customers");
    Ok(Json(customers))
}

/// POST /customers - Add a customer.
///
/// # Errors
///
/// Returns `AppError::Validation` for an invalid payload (the store is not
/// touched) and `AppError::Database` if the insert fails.
#[instrument(skip(state, payload))]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let input: CustomerInput = load_payload(&CUSTOMER_SCHEMA, payload)?;

    let mut session = state.open_session().await?;
    let customer_id = session.insert_customer(&input).await?;
    db::release(session).await;

    tracing::info!(%customer_id, "Customer created");
    Ok((
        StatusCode::CREATED,
        MessageResponse::json("New customer added successfully"),
    ))
}

/// PUT /customers/{id} - Replace a customer's name, email and phone.
///
/// There is no existence check: updating an unknown id succeeds without
/// changing anything.
///
/// # Errors
///
/// Returns `AppError::Validation` for an invalid payload and
/// `AppError::Database` if the update fails.
#[instrument(skip(state, payload))]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let input: CustomerInput = load_payload(&CUSTOMER_SCHEMA, payload)?;
    let customer_id = CustomerId::new(id);

    let mut session = state.open_session().await?;
    let rows = session.update_customer(customer_id, &input).await?;
    db::release(session).await;

    tracing::info!(%customer_id, rows, "Customer updated");
    Ok(MessageResponse::json("Customer details updated successfully"))
}

/// DELETE /customers/{id} - Remove a customer that has no orders.
///
/// The existence check, the order check and the delete are separate
/// statements; an order inserted in between makes the delete fail on the
/// foreign key and surface as a store error.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the customer does not exist,
/// `AppError::Forbidden` if orders reference it, and `AppError::Database`
/// if the store fails.
#[instrument(skip(state))]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let customer_id = CustomerId::new(id);
    let mut session = state.open_session().await?;

    if session.find_customer(customer_id).await?.is_none() {
        db::release(session).await;
        return Err(AppError::NotFound("Customer not found.".to_string()));
    }

    let orders = session.count_customer_orders(customer_id).await?;
    if orders > 0 {
        db::release(session).await;
        tracing::info!(%customer_id, orders, "Refused to delete customer with orders");
        return Err(AppError::Forbidden(
            "Customer has associated orders and cannot be deleted.".to_string(),
        ));
    }

    session.delete_customer(customer_id).await?;
    db::release(session).await;

    tracing::info!(%customer_id, "Customer deleted");
    Ok(MessageResponse::json("Customer removed successfully"))
}
