//! In-process gateway with the same two-table semantics as `PostgreSQL`.
//!
//! Ids are generated sequentially, order inserts and updates check that the
//! customer exists, and deleting a referenced customer is refused, mirroring
//! the foreign key in the migrations. The gateway also counts live sessions
//! and can be switched into failure modes, which is what the router tests use
//! to observe session release and store-error handling.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use backoffice_core::{Customer, CustomerId, CustomerInput, Order, OrderId, OrderInput};

use super::{CustomerStore, Gateway, OrderStore, RepositoryError, Session};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    orders: BTreeMap<OrderId, Order>,
    last_customer_id: i32,
    last_order_id: i32,
}

#[derive(Debug, Default)]
struct Shared {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
    failing: AtomicBool,
    live_sessions: AtomicUsize,
    opened_sessions: AtomicUsize,
    closed_sessions: AtomicUsize,
}

/// In-memory gateway. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    shared: Arc<Shared>,
}

impl MemoryGateway {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `open()` fails as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.shared.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// When set, sessions open normally but every statement fails.
    pub fn set_failing(&self, failing: bool) {
        self.shared.failing.store(failing, Ordering::SeqCst);
    }

    /// Sessions currently open (not yet dropped).
    #[must_use]
    pub fn live_sessions(&self) -> usize {
        self.shared.live_sessions.load(Ordering::SeqCst)
    }

    /// Sessions opened since creation.
    #[must_use]
    pub fn opened_sessions(&self) -> usize {
        self.shared.opened_sessions.load(Ordering::SeqCst)
    }

    /// Sessions released through `close()` rather than a plain drop.
    #[must_use]
    pub fn closed_sessions(&self) -> usize {
        self.shared.closed_sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn open(&self) -> Result<Box<dyn Session>, RepositoryError> {
        if self.shared.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "memory store is marked unavailable".to_owned(),
            ));
        }
        self.shared.live_sessions.fetch_add(1, Ordering::SeqCst);
        self.shared.opened_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            shared: Arc::clone(&self.shared),
        }))
    }
}

/// A session on the in-memory store.
#[derive(Debug)]
pub struct MemorySession {
    shared: Arc<Shared>,
}

impl MemorySession {
    fn check(&self) -> Result<(), RepositoryError> {
        if self.shared.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "memory store statement failure".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.shared.live_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

fn affected(hit: bool) -> u64 {
    u64::from(hit)
}

#[async_trait]
impl Session for MemorySession {
    async fn ping(&mut self) -> Result<(), RepositoryError> {
        self.check()
    }

    async fn close(self: Box<Self>) -> Result<(), RepositoryError> {
        self.shared.closed_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemorySession {
    async fn list_customers(&mut self) -> Result<Vec<Customer>, RepositoryError> {
        self.check()?;
        let tables = self.shared.tables.lock().await;
        Ok(tables.customers.values().cloned().collect())
    }

    async fn find_customer(&mut self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.check()?;
        let tables = self.shared.tables.lock().await;
        Ok(tables.customers.get(&id).cloned())
    }

    async fn insert_customer(
        &mut self,
        input: &CustomerInput,
    ) -> Result<CustomerId, RepositoryError> {
        self.check()?;
        let mut tables = self.shared.tables.lock().await;
        tables.last_customer_id += 1;
        let id = CustomerId::new(tables.last_customer_id);
        tables.customers.insert(id, input.clone().into_customer(id));
        Ok(id)
    }

    async fn update_customer(
        &mut self,
        id: CustomerId,
        input: &CustomerInput,
    ) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut tables = self.shared.tables.lock().await;
        if let Some(row) = tables.customers.get_mut(&id) {
            *row = input.clone().into_customer(id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn count_customer_orders(&mut self, id: CustomerId) -> Result<i64, RepositoryError> {
        self.check()?;
        let tables = self.shared.tables.lock().await;
        let count = tables
            .orders
            .values()
            .filter(|o| o.customer_id == id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn delete_customer(&mut self, id: CustomerId) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut tables = self.shared.tables.lock().await;
        if tables.orders.values().any(|o| o.customer_id == id) {
            return Err(RepositoryError::Constraint(format!(
                "customer {id} is still referenced by orders"
            )));
        }
        Ok(affected(tables.customers.remove(&id).is_some()))
    }
}

#[async_trait]
impl OrderStore for MemorySession {
    async fn list_orders(&mut self) -> Result<Vec<Order>, RepositoryError> {
        self.check()?;
        let tables = self.shared.tables.lock().await;
        Ok(tables.orders.values().cloned().collect())
    }

    async fn find_order(&mut self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        self.check()?;
        let tables = self.shared.tables.lock().await;
        Ok(tables.orders.get(&id).cloned())
    }

    async fn insert_order(&mut self, input: &OrderInput) -> Result<OrderId, RepositoryError> {
        self.check()?;
        let mut tables = self.shared.tables.lock().await;
        if !tables.customers.contains_key(&input.customer_id) {
            return Err(missing_customer(input.customer_id));
        }
        tables.last_order_id += 1;
        let id = OrderId::new(tables.last_order_id);
        tables.orders.insert(id, input.clone().into_order(id));
        Ok(id)
    }

    async fn update_order(
        &mut self,
        id: OrderId,
        input: &OrderInput,
    ) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut tables = self.shared.tables.lock().await;
        if !tables.orders.contains_key(&id) {
            return Ok(0);
        }
        if !tables.customers.contains_key(&input.customer_id) {
            return Err(missing_customer(input.customer_id));
        }
        tables.orders.insert(id, input.clone().into_order(id));
        Ok(1)
    }

    async fn delete_order(&mut self, id: OrderId) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut tables = self.shared.tables.lock().await;
        Ok(affected(tables.orders.remove(&id).is_some()))
    }
}

fn missing_customer(id: CustomerId) -> RepositoryError {
    RepositoryError::Constraint(format!("customer {id} does not exist"))
}
