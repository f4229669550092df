//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! customer service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built customers and reference dates
//! - `builders`: Builder patterns for requests and records
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for customer views and errors
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
