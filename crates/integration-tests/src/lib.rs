//! Integration tests for the back office.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no database needed)
//! cargo test -p backoffice-integration-tests
//!
//! # Live tests against a running server and PostgreSQL
//! cargo run -p backoffice-cli -- migrate
//! cargo run -p backoffice-admin &
//! cargo test -p backoffice-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `customers` / `orders` - Resource behavior through the full router
//! - `sessions` - Session release and store-failure handling
//! - `live_server` - HTTP tests against a deployed instance (`#[ignore]`)

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use backoffice_admin::{db::MemoryGateway, state::AppState};

/// Base URL for live tests (configurable via environment).
#[must_use]
pub fn live_base_url() -> String {
    std::env::var("BACKOFFICE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Router wired to a fresh in-memory store.
pub struct TestContext {
    pub gateway: MemoryGateway,
    router: Router,
}

/// A captured response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestContext {
    /// Build a router over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let gateway = MemoryGateway::new();
        let router = backoffice_admin::app(AppState::new(gateway.clone()));
        Self { gateway, router }
    }

    /// Send a request, with an optional JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.dispatch(request).await
    }

    /// Send a request with a raw body and explicit content type.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_owned()))
            .unwrap();

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Current customer listing as a JSON array.
    pub async fn customers(&self) -> Vec<Value> {
        let response = self.get("/customers").await;
        assert_eq!(response.status, StatusCode::OK);
        response.body.as_array().cloned().unwrap()
    }

    /// Current order listing as a JSON array.
    pub async fn orders(&self) -> Vec<Value> {
        let response = self.get("/orders").await;
        assert_eq!(response.status, StatusCode::OK);
        response.body.as_array().cloned().unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
