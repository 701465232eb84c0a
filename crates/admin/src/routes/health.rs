//! Health check endpoints.

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::{db::RepositoryError, state::AppState};

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Opens a store session, pings it and closes it.
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match check_store(&state).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn check_store(state: &AppState) -> Result<(), RepositoryError> {
    let mut session = state.open_session().await?;
    session.ping().await?;
    session.close().await
}
