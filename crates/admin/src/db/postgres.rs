//! `PostgreSQL` gateway: one fresh connection per session, no pool.

use std::str::FromStr;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use super::{Gateway, RepositoryError, Session};

/// Gateway that connects to `PostgreSQL` on every `open()`.
#[derive(Debug, Clone)]
pub struct PgGateway {
    options: PgConnectOptions,
}

impl PgGateway {
    /// Build a gateway from a connection URL. Does not connect.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` if the URL cannot be parsed.
    pub fn new(database_url: &SecretString) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(database_url.expose_secret())?;
        Ok(Self { options })
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn open(&self) -> Result<Box<dyn Session>, RepositoryError> {
        let conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(Box::new(PgSession { conn }))
    }
}

/// A session backed by a dedicated `PostgreSQL` connection.
///
/// `close()` sends a terminate message; dropping the session without it just
/// shuts the socket.
pub struct PgSession {
    conn: PgConnection,
}

impl PgSession {
    pub(super) fn conn(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

#[async_trait]
impl Session for PgSession {
    async fn ping(&mut self) -> Result<(), RepositoryError> {
        self.conn.ping().await?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), RepositoryError> {
        self.conn.close().await?;
        Ok(())
    }
}

/// Translate foreign-key violations into `RepositoryError::Constraint`.
pub(super) fn map_constraint(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Constraint(db_err.message().to_owned());
    }
    RepositoryError::Database(e)
}
