//! Domain Adapters
//!
//! This module connects domain ports to the PostgreSQL database layer.
//! Each adapter implements a port trait, translates between domain models
//! and row types, and delegates SQL to a repository.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::CustomerStore;
//!
//! let store = PostgresCustomerStore::new(pool);
//! let customers = store.find_all_order_by_creation_desc().await?;
//! ```

pub mod customer;

pub use customer::PostgresCustomerStore;
