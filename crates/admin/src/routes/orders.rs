//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::Value;
use tracing::instrument;

use backoffice_core::{ORDER_SCHEMA, Order, OrderId, OrderInput};

use super::{MessageResponse, load_payload};
use crate::{db, error::AppError, state::AppState};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{order_id}",
            put(update_order).delete(delete_order),
        )
}

/// GET /orders - List all orders.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let mut session = state.open_session().await?;
    let orders = session.list_orders().await?;
    db::release(session).await;
    tracing::debug!(count = orders.len(), "Listed orders");
    Ok(Json(orders))
}

/// POST /orders - Add an order for an existing customer.
///
/// # Errors
///
/// Returns `AppError::Validation` for an invalid payload and
/// `AppError::Database` if the insert fails, including when the customer
/// does not exist.
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let input: OrderInput = load_payload(&ORDER_SCHEMA, payload)?;

    let mut session = state.open_session().await?;
    let order_id = session.insert_order(&input).await?;
    db::release(session).await;

    tracing::info!(%order_id, customer_id = %input.customer_id, "Order created");
    Ok((
        StatusCode::CREATED,
        MessageResponse::json("New order added successfully"),
    ))
}

/// PUT /orders/{order_id} - Replace an order's customer and date.
///
/// # Errors
///
/// Returns `AppError::Validation` for an invalid payload and
/// `AppError::Database` if the update fails.
#[instrument(skip(state, payload))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let input: OrderInput = load_payload(&ORDER_SCHEMA, payload)?;
    let order_id = OrderId::new(order_id);

    let mut session = state.open_session().await?;
    let rows = session.update_order(order_id, &input).await?;
    db::release(session).await;

    tracing::info!(%order_id, rows, "Order updated");
    Ok(MessageResponse::json("Order updated successfully"))
}

/// DELETE /orders/{order_id} - Remove an order.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order does not exist and
/// `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let order_id = OrderId::new(order_id);
    let mut session = state.open_session().await?;

    if session.find_order(order_id).await?.is_none() {
        db::release(session).await;
        return Err(AppError::NotFound("Order not found.".to_string()));
    }

    session.delete_order(order_id).await?;
    db::release(session).await;

    tracing::info!(%order_id, "Order deleted");
    Ok(MessageResponse::json("Order removed successfully"))
}
