//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bo-cli migrate
//! ```
//!
//! # Migration Files
//!
//! Migrations live in `crates/admin/migrations/` and are embedded at build
//! time:
//! ```text
//! migrations/
//! ├── 20260101000001_create_customers.sql
//! └── 20260101000002_create_orders.sql
//! ```

use secrecy::ExposeSecret;
use sqlx::{Connection, PgConnection};

use super::{CommandError, database_url};

/// Run back-office database migrations.
///
/// # Errors
///
/// Returns an error if the URL is missing, the connection fails, or a
/// migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to back-office database...");
    let mut conn = PgConnection::connect(database_url.expose_secret()).await?;

    tracing::info!("Running back-office migrations...");
    sqlx::migrate!("../admin/migrations").run(&mut conn).await?;

    conn.close().await?;
    tracing::info!("Back-office migrations complete!");
    Ok(())
}
