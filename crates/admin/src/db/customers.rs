//! Customer table access.
//!
//! Queries use runtime-checked `sqlx::query_as` so the crate builds without a
//! live database or an offline query cache.

use async_trait::async_trait;
use tracing::instrument;

use backoffice_core::{Customer, CustomerId, CustomerInput};

use super::RepositoryError;
use super::postgres::{PgSession, map_constraint};

/// Customer operations available on a session.
#[async_trait]
pub trait CustomerStore {
    /// List every customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn list_customers(&mut self) -> Result<Vec<Customer>, RepositoryError>;

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn find_customer(&mut self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Insert a customer and return its store-generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    async fn insert_customer(&mut self, input: &CustomerInput)
    -> Result<CustomerId, RepositoryError>;

    /// Replace name, email and phone of a customer. Returns rows affected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the update fails.
    async fn update_customer(
        &mut self,
        id: CustomerId,
        input: &CustomerInput,
    ) -> Result<u64, RepositoryError>;

    /// Count orders referencing a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn count_customer_orders(&mut self, id: CustomerId) -> Result<i64, RepositoryError>;

    /// Delete a customer. Returns rows affected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Constraint` if orders still reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn delete_customer(&mut self, id: CustomerId) -> Result<u64, RepositoryError>;
}

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: CustomerId,
    name: String,
    email: String,
    phone: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            name: row.name,
            email: row.email,
            phone: row.phone,
            customer_id: row.customer_id,
        }
    }
}

// =============================================================================
// PostgreSQL
// =============================================================================

#[async_trait]
impl CustomerStore for PgSession {
    #[instrument(skip(self))]
    async fn list_customers(&mut self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT customer_id, name, email, phone
            FROM customers
            ORDER BY customer_id
            ",
        )
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn find_customer(&mut self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT customer_id, name, email, phone
            FROM customers
            WHERE customer_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, input))]
    async fn insert_customer(
        &mut self,
        input: &CustomerInput,
    ) -> Result<CustomerId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CustomerId>(
            r"
            INSERT INTO customers (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING customer_id
            ",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_one(self.conn())
        .await
        .map_err(map_constraint)?;

        Ok(id)
    }

    #[instrument(skip(self, input))]
    async fn update_customer(
        &mut self,
        id: CustomerId,
        input: &CustomerInput,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customers
            SET name = $1, email = $2, phone = $3
            WHERE customer_id = $4
            ",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(id)
        .execute(self.conn())
        .await
        .map_err(map_constraint)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_customer_orders(&mut self, id: CustomerId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM orders
            WHERE customer_id = $1
            ",
        )
        .bind(id)
        .fetch_one(self.conn())
        .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn delete_customer(&mut self, id: CustomerId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id)
            .execute(self.conn())
            .await
            .map_err(map_constraint)?;

        Ok(result.rows_affected())
    }
}
