//! PostgreSQL Customer Adapter
//!
//! This module provides the database adapter for the customer domain,
//! implementing the `CustomerStore` trait using the `CustomerRepository`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::CustomerStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn CustomerStore> = Arc::new(PostgresCustomerStore::new(pool));
//! let record = store.find_by_id(id).await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_customer::{CustomerRecord, CustomerStore};

use crate::repositories::customer::{CustomerRepository, CustomerRow, CustomerValues};

const ADAPTER_ID: &str = "postgres-customer-store";

/// PostgreSQL-backed implementation of `CustomerStore`
///
/// Database errors are translated to `PortError` through
/// `From<DatabaseError>`; a missing row on update becomes
/// `PortError::NotFound`.
#[derive(Debug, Clone)]
pub struct PostgresCustomerStore {
    repository: CustomerRepository,
}

impl PostgresCustomerStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresCustomerStore {}

#[async_trait]
impl HealthCheckable for PostgresCustomerStore {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CustomerStore for PostgresCustomerStore {
    #[instrument(skip(self, record), fields(customer_id = ?record.id))]
    async fn save(&self, record: CustomerRecord) -> Result<CustomerRecord, PortError> {
        let values = record_to_values(&record);
        let row = match record.id {
            None => {
                debug!("Inserting customer");
                self.repository.insert(&values).await?
            }
            Some(id) => {
                debug!("Updating customer");
                self.repository.update(id.value(), &values).await?
            }
        };
        Ok(row_to_record(row))
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, PortError> {
        debug!("Fetching customer by ID");
        let row = self.repository.find_by_id(id.value()).await?;
        Ok(row.map(row_to_record))
    }

    #[instrument(skip(self))]
    async fn find_all_order_by_creation_desc(&self) -> Result<Vec<CustomerRecord>, PortError> {
        let rows = self.repository.find_all_by_creation_desc().await?;
        debug!(count = rows.len(), "Fetched customers");
        Ok(rows.into_iter().map(row_to_record).collect())
    }

    #[instrument(skip(self, record), fields(customer_id = ?record.id))]
    async fn delete(&self, record: &CustomerRecord) -> Result<(), PortError> {
        let id = record
            .id
            .ok_or_else(|| PortError::validation_field("Cannot delete an unsaved customer", "id"))?;
        if !self.repository.delete(id.value()).await? {
            return Err(PortError::not_found("Customer", id));
        }
        debug!("Deleted customer");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<i64, PortError> {
        Ok(self.repository.age_aggregates().await?.total)
    }

    #[instrument(skip(self))]
    async fn average_age(&self) -> Result<Option<f64>, PortError> {
        Ok(self.repository.age_aggregates().await?.average)
    }

    #[instrument(skip(self))]
    async fn age_standard_deviation(&self) -> Result<Option<f64>, PortError> {
        Ok(self.repository.age_aggregates().await?.stddev)
    }
}

fn record_to_values(record: &CustomerRecord) -> CustomerValues {
    CustomerValues {
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        age: record.age,
        birth_date: record.birth_date,
        estimated_milestone_date: record.estimated_milestone_date,
    }
}

fn row_to_record(row: CustomerRow) -> CustomerRecord {
    CustomerRecord {
        id: Some(CustomerId::new(row.id)),
        first_name: row.first_name,
        last_name: row.last_name,
        age: row.age,
        birth_date: row.birth_date,
        estimated_milestone_date: row.estimated_milestone_date,
        creation_timestamp: Some(row.created_at),
        update_timestamp: Some(row.updated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_row_to_record_sets_store_fields() {
        let now = Utc::now();
        let row = CustomerRow {
            id: 12,
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            age: 30,
            birth_date: NaiveDate::from_ymd_opt(1994, 1, 1).unwrap(),
            estimated_milestone_date: NaiveDate::from_ymd_opt(2059, 1, 1),
            created_at: now,
            updated_at: now,
        };

        let record = row_to_record(row);

        assert_eq!(record.id, Some(CustomerId::new(12)));
        assert_eq!(record.creation_timestamp, Some(now));
        assert_eq!(record.update_timestamp, Some(now));
    }

    #[test]
    fn test_record_to_values_ignores_store_fields() {
        let mut record = CustomerRecord::new("Ana", "López", 40, NaiveDate::from_ymd_opt(1984, 5, 5).unwrap());
        record.id = Some(CustomerId::new(3));

        let values = record_to_values(&record);

        assert_eq!(values.first_name, "Ana");
        assert_eq!(values.age, 40);
        assert!(values.estimated_milestone_date.is_none());
    }
}
