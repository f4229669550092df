//! Customer Domain Ports
//!
//! This module defines the two outbound ports of the customer domain:
//!
//! - **`CustomerStore`**: persistence of customer records
//! - **`NotificationSink`**: best-effort publication of change notifications
//!
//! # Adapters
//!
//! - `PostgresCustomerStore` in `infra_db`
//! - `AmqpNotificationSink` in `infra_messaging`
//! - `TracingNotificationSink` in [`crate::adapters`]
//! - In-memory store and recording/failing sinks in [`mock`] (feature `mock`)
//!
//! # Usage
//!
//! ```rust,ignore
//! let store: Arc<dyn CustomerStore> = Arc::new(PostgresCustomerStore::new(pool));
//! let sink: Arc<dyn NotificationSink> = Arc::new(AmqpNotificationSink::new(amqp_config));
//! let service = CustomerService::new(store, sink);
//! ```

use async_trait::async_trait;
use serde_json::Value;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, PortError};

use crate::customer::CustomerRecord;
use crate::error::NotificationError;

/// Persistence port for customer records
///
/// The store owns identifiers and audit timestamps: `save` assigns the id and
/// creation timestamp on insert and refreshes the update timestamp on every
/// call. Callers never set those fields.
#[async_trait]
pub trait CustomerStore: DomainPort + HealthCheckable {
    /// Inserts the record when it has no id, otherwise overwrites it
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` when updating an id that no longer exists.
    async fn save(&self, record: CustomerRecord) -> Result<CustomerRecord, PortError>;

    /// Looks up a record by id
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, PortError>;

    /// Returns every record, newest first; equal timestamps order by id descending
    async fn find_all_order_by_creation_desc(&self) -> Result<Vec<CustomerRecord>, PortError>;

    /// Removes a persisted record
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` when no row with the record's id remains.
    async fn delete(&self, record: &CustomerRecord) -> Result<(), PortError>;

    /// Number of stored records
    async fn count(&self) -> Result<i64, PortError>;

    /// Mean age, `None` when empty
    async fn average_age(&self) -> Result<Option<f64>, PortError>;

    /// Population standard deviation of ages, `None` when empty
    async fn age_standard_deviation(&self) -> Result<Option<f64>, PortError>;
}

/// Outbound port for change notifications
///
/// Implementations attempt delivery once. The service treats every error as
/// non-fatal.
#[async_trait]
pub trait NotificationSink: DomainPort {
    /// Publishes a JSON payload to a topic
    async fn publish(&self, topic: &str, payload: &Value) -> Result<(), NotificationError>;
}

/// In-memory adapters for tests and local development
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory implementation of `CustomerStore`
    ///
    /// Mirrors the database adapter: sequential ids starting at 1, creation
    /// timestamp set once, update timestamp refreshed on every save.
    #[derive(Debug)]
    pub struct InMemoryCustomerStore {
        records: Arc<RwLock<HashMap<CustomerId, CustomerRecord>>>,
        next_id: AtomicI64,
        healthy: bool,
    }

    impl Default for InMemoryCustomerStore {
        fn default() -> Self {
            Self {
                records: Arc::new(RwLock::new(HashMap::new())),
                next_id: AtomicI64::new(1),
                healthy: true,
            }
        }
    }

    impl InMemoryCustomerStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a store whose health check reports `Unhealthy`
        pub fn unhealthy() -> Self {
            Self {
                healthy: false,
                ..Self::default()
            }
        }

        /// Saves every record, returning them with ids assigned
        pub async fn with_records(records: Vec<CustomerRecord>) -> Result<(Self, Vec<CustomerRecord>), PortError> {
            let store = Self::new();
            let mut saved = Vec::with_capacity(records.len());
            for record in records {
                saved.push(store.save(record).await?);
            }
            Ok((store, saved))
        }

        async fn ages(&self) -> Vec<f64> {
            self.records
                .read()
                .await
                .values()
                .map(|r| f64::from(r.age))
                .collect()
        }
    }

    impl DomainPort for InMemoryCustomerStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryCustomerStore {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.healthy {
                (AdapterHealth::Healthy, "In-memory store always healthy")
            } else {
                (AdapterHealth::Unhealthy, "In-memory store marked unhealthy")
            };
            HealthCheckResult {
                adapter_id: "in-memory-customer-store".to_string(),
                status,
                latency_ms: 0,
                message: Some(message.to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CustomerStore for InMemoryCustomerStore {
        async fn save(&self, mut record: CustomerRecord) -> Result<CustomerRecord, PortError> {
            let now = Utc::now();
            let mut records = self.records.write().await;

            match record.id {
                None => {
                    let id = CustomerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                    record.id = Some(id);
                    record.creation_timestamp = Some(now);
                    record.update_timestamp = Some(now);
                    records.insert(id, record.clone());
                }
                Some(id) => {
                    let existing = records
                        .get_mut(&id)
                        .ok_or_else(|| PortError::not_found("Customer", id))?;
                    record.creation_timestamp = existing.creation_timestamp;
                    record.update_timestamp = Some(now);
                    *existing = record.clone();
                }
            }

            Ok(record)
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, PortError> {
            Ok(self.records.read().await.get(&id).cloned())
        }

        async fn find_all_order_by_creation_desc(&self) -> Result<Vec<CustomerRecord>, PortError> {
            let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
            records.sort_by(|a, b| {
                b.creation_timestamp
                    .cmp(&a.creation_timestamp)
                    .then_with(|| b.id.cmp(&a.id))
            });
            Ok(records)
        }

        async fn delete(&self, record: &CustomerRecord) -> Result<(), PortError> {
            let id = record
                .id
                .ok_or_else(|| PortError::validation_field("Cannot delete an unsaved customer", "id"))?;
            self.records
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Customer", id))
        }

        async fn count(&self) -> Result<i64, PortError> {
            let count = self.records.read().await.len();
            i64::try_from(count).map_err(|_| PortError::internal("Customer count exceeds i64"))
        }

        async fn average_age(&self) -> Result<Option<f64>, PortError> {
            let ages = self.ages().await;
            if ages.is_empty() {
                return Ok(None);
            }
            Ok(Some(ages.iter().sum::<f64>() / ages.len() as f64))
        }

        async fn age_standard_deviation(&self) -> Result<Option<f64>, PortError> {
            let ages = self.ages().await;
            if ages.is_empty() {
                return Ok(None);
            }
            let n = ages.len() as f64;
            let mean = ages.iter().sum::<f64>() / n;
            let variance = ages.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
            Ok(Some(variance.sqrt()))
        }
    }

    /// Sink that keeps every published notification in memory
    #[derive(Debug, Default)]
    pub struct RecordingNotificationSink {
        published: RwLock<Vec<(String, Value)>>,
    }

    impl RecordingNotificationSink {
        /// Creates an empty recording sink
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the published (topic, payload) pairs in publish order
        pub async fn published(&self) -> Vec<(String, Value)> {
            self.published.read().await.clone()
        }

        /// Returns the payloads published to one topic
        pub async fn published_to(&self, topic: &str) -> Vec<Value> {
            self.published
                .read()
                .await
                .iter()
                .filter(|(t, _)| t == topic)
                .map(|(_, payload)| payload.clone())
                .collect()
        }
    }

    impl DomainPort for RecordingNotificationSink {}

    #[async_trait]
    impl NotificationSink for RecordingNotificationSink {
        async fn publish(&self, topic: &str, payload: &Value) -> Result<(), NotificationError> {
            self.published
                .write()
                .await
                .push((topic.to_string(), payload.clone()));
            Ok(())
        }
    }

    /// Sink whose every publish fails, counting the attempts
    #[derive(Debug, Default)]
    pub struct FailingNotificationSink {
        attempts: AtomicUsize,
    }

    impl FailingNotificationSink {
        /// Creates a failing sink with no recorded attempts
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of publish calls received
        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for FailingNotificationSink {}

    #[async_trait]
    impl NotificationSink for FailingNotificationSink {
        async fn publish(&self, topic: &str, _payload: &Value) -> Result<(), NotificationError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(NotificationError::delivery(topic, "broker unavailable"))
        }
    }
}
