//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for customer records using
//! SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `CustomerRepository` owns the
//! SQL, and `PostgresCustomerStore` adapts it to the domain's
//! `CustomerStore` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresCustomerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/customers")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresCustomerStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::CustomerRepository;
pub use adapters::PostgresCustomerStore;
