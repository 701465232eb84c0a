//! Static informational pages.

use axum::{Router, response::Html, routing::get};

use crate::state::AppState;

/// Build the pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
}

/// GET / - Welcome banner.
pub async fn home() -> Html<&'static str> {
    Html("<h1>Back-office API</h1><p>Manage customers and their orders over JSON.</p>")
}

/// GET /about - What this service does.
pub async fn about() -> Html<&'static str> {
    Html("<h3>This application creates customers and orders for an e-commerce store.</h3>")
}
