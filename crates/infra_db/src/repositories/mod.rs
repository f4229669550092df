//! Repository implementations
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! plain Rust values. They return `DatabaseError`; translation to domain
//! errors happens in the adapters.

pub mod customer;

pub use customer::CustomerRepository;
