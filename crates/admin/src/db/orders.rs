//! Order table access.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::instrument;

use backoffice_core::{CustomerId, Order, OrderId, OrderInput};

use super::RepositoryError;
use super::postgres::{PgSession, map_constraint};

/// Order operations available on a session.
#[async_trait]
pub trait OrderStore {
    /// List every order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn list_orders(&mut self) -> Result<Vec<Order>, RepositoryError>;

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn find_order(&mut self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Insert an order and return its store-generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Constraint` if the customer does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert_order(&mut self, input: &OrderInput) -> Result<OrderId, RepositoryError>;

    /// Replace customer and date of an order. Returns rows affected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Constraint` if the customer does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn update_order(&mut self, id: OrderId, input: &OrderInput)
    -> Result<u64, RepositoryError>;

    /// Delete an order. Returns rows affected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the delete fails.
    async fn delete_order(&mut self, id: OrderId) -> Result<u64, RepositoryError>;
}

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: OrderId,
    customer_id: CustomerId,
    date: NaiveDate,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            order_id: row.order_id,
            customer_id: row.customer_id,
            date: row.date,
        }
    }
}

#[async_trait]
impl OrderStore for PgSession {
    #[instrument(skip(self))]
    async fn list_orders(&mut self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, customer_id, "date"
            FROM orders
            ORDER BY order_id
            "#,
        )
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn find_order(&mut self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, customer_id, "date"
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), fields(customer_id = %input.customer_id))]
    async fn insert_order(&mut self, input: &OrderInput) -> Result<OrderId, RepositoryError> {
        let id = sqlx::query_scalar::<_, OrderId>(
            r#"
            INSERT INTO orders (customer_id, "date")
            VALUES ($1, $2)
            RETURNING order_id
            "#,
        )
        .bind(input.customer_id)
        .bind(input.date)
        .fetch_one(self.conn())
        .await
        .map_err(map_constraint)?;

        Ok(id)
    }

    #[instrument(skip(self), fields(customer_id = %input.customer_id))]
    async fn update_order(
        &mut self,
        id: OrderId,
        input: &OrderInput,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET customer_id = $1, "date" = $2
            WHERE order_id = $3
            "#,
        )
        .bind(input.customer_id)
        .bind(input.date)
        .bind(id)
        .execute(self.conn())
        .await
        .map_err(map_constraint)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_order(&mut self, id: OrderId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected())
    }
}
