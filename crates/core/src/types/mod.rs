//! Core types for the back office.
//!
//! This module provides type-safe ids and the two resource records.

pub mod customer;
pub mod id;
pub mod order;

pub use customer::{CUSTOMER_SCHEMA, Customer, CustomerInput};
pub use id::*;
pub use order::{ORDER_SCHEMA, Order, OrderInput};
