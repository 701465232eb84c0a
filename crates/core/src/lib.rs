//! Back-Office Core - Shared types library.
//!
//! This crate provides the types shared by the back-office components:
//! - `admin` - The customers/orders HTTP API
//! - `cli` - Command-line tools for migrations
//! - `integration-tests` - Router and live-server tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Database encoding for ids is behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed ids and the `Customer`/`Order` records
//! - [`validation`] - Declarative payload schemas and field-level errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{FieldKind, FieldSpec, LoadedFields, Payload, Schema, ValidationErrors};
