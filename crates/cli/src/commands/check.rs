//! Connectivity check command.

use backoffice_admin::db::{Gateway, PgGateway};

use super::{CommandError, database_url};

/// Open one session through the same gateway the server uses and ping it.
///
/// # Errors
///
/// Returns an error if the URL is missing or invalid, or the database does
/// not answer.
pub async fn run() -> Result<(), CommandError> {
    let gateway = PgGateway::new(&database_url()?)?;

    let mut session = gateway.open().await?;
    session.ping().await?;

    let customers = session.list_customers().await?.len();
    let orders = session.list_orders().await?.len();
    session.close().await?;
    tracing::info!(customers, orders, "Database reachable");
    Ok(())
}
