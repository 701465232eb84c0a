//! Order resource behavior through the full router.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use backoffice_integration_tests::TestContext;

async fn with_customers(count: usize) -> TestContext {
    let ctx = TestContext::new();
    for i in 0..count {
        let resp = ctx
            .post(
                "/customers",
                &json!({"name": format!("Customer {i}"), "email": format!("c{i}@x.com"), "phone": "555-0100"}),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }
    ctx
}

fn order(customer_id: impl Into<Value>, date: &str) -> Value {
    json!({"customer_id": customer_id.into(), "date": date})
}

// ============================================================================
// List & Create
// ============================================================================

#[tokio::test]
async fn test_create_then_list() {
    let ctx = with_customers(1).await;

    let resp = ctx.post("/orders", &order(1, "2024-01-01")).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body, json!({"message": "New order added successfully"}));

    assert_eq!(
        ctx.orders().await,
        vec![json!({"order_id": 1, "customer_id": 1, "date": "2024-01-01"})]
    );
}

#[tokio::test]
async fn test_create_accepts_integral_customer_id_forms() {
    let ctx = with_customers(1).await;

    assert_eq!(
        ctx.post("/orders", &order("1", "2024-02-29")).await.status,
        StatusCode::CREATED
    );
    assert_eq!(
        ctx.post("/orders", &order(1.0, "2024-03-01")).await.status,
        StatusCode::CREATED
    );

    let orders = ctx.orders().await;
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["customer_id"] == 1));
}

#[tokio::test]
async fn test_create_rejects_bad_fields() {
    let ctx = with_customers(1).await;

    let resp = ctx.post("/orders", &order("abc", "01/02/2024")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.body,
        json!({
            "customer_id": ["Not a valid integer."],
            "date": ["Not a valid date."]
        })
    );

    let resp = ctx.post("/orders", &order(1, "2023-02-30")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.get("date").is_some());

    let resp = ctx.post("/orders", &order(1.5, "2024-01-01")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.get("customer_id").is_some());

    assert!(ctx.orders().await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_output_only_fields() {
    let ctx = with_customers(1).await;

    let resp = ctx
        .post(
            "/orders",
            &json!({"order_id": 5, "customer_id": 1, "date": "2024-01-01"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({"order_id": ["Unknown field."]}));
}

#[tokio::test]
async fn test_create_for_missing_customer_is_a_store_error() {
    let ctx = with_customers(0).await;

    let resp = ctx.post("/orders", &order(77, "2024-01-01")).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, json!({"error": "Internal Server Error"}));
    assert!(ctx.orders().await.is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_moves_order_to_other_customer() {
    let ctx = with_customers(2).await;
    ctx.post("/orders", &order(1, "2024-01-01")).await;

    let resp = ctx.put("/orders/1", &order(2, "2024-06-15")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({"message": "Order updated successfully"}));

    assert_eq!(
        ctx.orders().await,
        vec![json!({"order_id": 1, "customer_id": 2, "date": "2024-06-15"})]
    );

    // Customer 1 has no orders left.
    assert_eq!(ctx.delete("/customers/1").await.status, StatusCode::OK);
    assert_eq!(ctx.delete("/customers/2").await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_requires_both_fields() {
    let ctx = with_customers(1).await;
    ctx.post("/orders", &order(1, "2024-01-01")).await;

    let resp = ctx.put("/orders/1", &json!({"date": "2024-05-05"})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.body,
        json!({"customer_id": ["Missing data for required field."]})
    );
    assert_eq!(ctx.orders().await[0]["date"], "2024-01-01");
}

#[tokio::test]
async fn test_update_to_missing_customer_is_a_store_error() {
    let ctx = with_customers(1).await;
    ctx.post("/orders", &order(1, "2024-01-01")).await;

    let resp = ctx.put("/orders/1", &order(77, "2024-03-03")).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, json!({"error": "Internal Server Error"}));
    assert_eq!(ctx.orders().await[0]["customer_id"], 1);
}

#[tokio::test]
async fn test_update_unknown_order_succeeds_silently() {
    let ctx = with_customers(1).await;

    let resp = ctx.put("/orders/9999", &order(1, "2024-01-01")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(ctx.orders().await.is_empty());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_order() {
    let ctx = with_customers(1).await;
    ctx.post("/orders", &order(1, "2024-01-01")).await;
    ctx.post("/orders", &order(1, "2024-01-02")).await;

    let resp = ctx.delete("/orders/1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({"message": "Order removed successfully"}));

    let orders = ctx.orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["order_id"], 2);
}

#[tokio::test]
async fn test_delete_missing_order_is_not_found() {
    let ctx = with_customers(0).await;

    let resp = ctx.delete("/orders/9999").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({"error": "Order not found."}));
}

#[tokio::test]
async fn test_order_ids_are_not_reused() {
    let ctx = with_customers(1).await;
    ctx.post("/orders", &order(1, "2024-01-01")).await;
    ctx.delete("/orders/1").await;
    ctx.post("/orders", &order(1, "2024-01-01")).await;

    assert_eq!(ctx.orders().await[0]["order_id"], 2);
}
