//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{Gateway, RepositoryError, Session};

/// Application state shared across all handlers.
///
/// Holds only the gateway; every request opens its own session through it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    gateway: Box<dyn Gateway>,
}

impl AppState {
    /// Create state around a store gateway.
    pub fn new(gateway: impl Gateway) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                gateway: Box::new(gateway),
            }),
        }
    }

    /// Returns the store gateway.
    #[must_use]
    pub fn gateway(&self) -> &dyn Gateway {
        self.inner.gateway.as_ref()
    }

    /// Open a session for the current request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be reached.
    pub async fn open_session(&self) -> Result<Box<dyn Session>, RepositoryError> {
        self.gateway().open().await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
