//! Store access for the back office.
//!
//! # Tables
//!
//! - `customers` - `customer_id SERIAL PK, name, email, phone`
//! - `orders` - `order_id SERIAL PK, customer_id FK -> customers, date`
//!
//! # Sessions
//!
//! Every request opens its own [`Session`] through the [`Gateway`] and owns it
//! until the handler returns. Handlers hand finished sessions to [`release`],
//! which closes them cleanly; on early returns the session is dropped, which
//! still releases the underlying connection. Each statement runs in autocommit
//! mode; no transaction spans two statements.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p backoffice-cli -- migrate
//! ```

pub mod customers;
pub mod memory;
pub mod orders;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use customers::CustomerStore;
pub use memory::MemoryGateway;
pub use orders::OrderStore;
pub use postgres::PgGateway;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached or refused the session.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Constraint violation (e.g., order referencing a missing customer).
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Opens store sessions.
#[async_trait]
pub trait Gateway: Send + Sync + 'static {
    /// Open a new session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be reached.
    async fn open(&self) -> Result<Box<dyn Session>, RepositoryError>;
}

/// One open store connection, owned by a single request.
#[async_trait]
pub trait Session: CustomerStore + OrderStore + Send {
    /// Round-trip a trivial statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store does not answer.
    async fn ping(&mut self) -> Result<(), RepositoryError>;

    /// Close the session with a clean shutdown of the connection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the close handshake fails. The connection
    /// is released either way.
    async fn close(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Close a finished session, logging instead of failing the request.
///
/// Every statement has already committed by the time this runs, so a failed
/// close does not change the response.
pub async fn release(session: Box<dyn Session>) {
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to close store session");
    }
}
