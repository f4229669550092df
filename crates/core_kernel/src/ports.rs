//! Port plumbing shared by every adapter
//!
//! ```text
//!            CustomerService
//!                  │
//!      ┌───────────┴────────────┐
//!      ▼                        ▼
//! CustomerStore          NotificationSink      (traits in domain_customer)
//!      ▲                        ▲
//!      │                        │
//! PostgresCustomerStore  AmqpNotificationSink  (infra_db, infra_messaging)
//! InMemoryCustomerStore  TracingNotificationSink
//! ```
//!
//! Store adapters report failures as [`PortError`] so the service treats
//! the database and in-memory stores alike.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Failure reported by a store adapter
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The adapter refused the data, e.g. a database CHECK constraint
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backing system could not be reached
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal { message: message.into() }
    }

    /// Connection failures may succeed if retried later
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker for port traits, so they can live behind `Arc<dyn ...>` in Tokio tasks
pub trait DomainPort: Send + Sync + 'static {}

/// Adapter health as reported by the readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    /// Answering, but slowly or partially
    Degraded,
    Unhealthy,
}

/// One health probe of an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Healthy and degraded adapters can still serve requests
    pub fn is_operational(&self) -> bool {
        self.status != AdapterHealth::Unhealthy
    }
}

/// Adapters that can probe their backing system
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}
