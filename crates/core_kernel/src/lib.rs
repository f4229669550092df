//! Core Kernel - Foundational types shared by every crate in the service
//!
//! This crate provides the building blocks used across the domain and
//! infrastructure layers:
//! - Strongly-typed identifiers
//! - Calendar helpers pinned to the UTC reference date
//! - Port error and health-check abstractions for adapters

pub mod identifiers;
pub mod temporal;
pub mod ports;

pub use identifiers::CustomerId;
pub use temporal::{today_utc, years_between, plus_years, TemporalError};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
