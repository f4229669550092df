//! Customer application service
//!
//! `CustomerService` orchestrates every customer use case: it re-checks the
//! age/birth-date rule, maps requests onto records, derives the milestone
//! date, persists through the store and then publishes a change
//! notification.
//!
//! Notifications are best-effort. They are published only after the store
//! confirmed the write, attempted exactly once, and a failure is logged and
//! discarded without affecting the result returned to the caller.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use core_kernel::{today_utc, CustomerId, HealthCheckResult, PortError};

use crate::customer::{CustomerRecord, CustomerStats, CustomerView};
use crate::error::CustomerError;
use crate::events::CustomerEvent;
use crate::mapper::CustomerMapper;
use crate::ports::{CustomerStore, NotificationSink};
use crate::request::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::validation::AgeBirthDateInvariant;

/// Customer use cases
///
/// # Example
///
/// ```rust,ignore
/// let service = CustomerService::new(store, sink);
/// let view = service.create(&request).await?;
/// let all = service.get_all().await?;
/// ```
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    notifications: Arc<dyn NotificationSink>,
}

impl CustomerService {
    /// Creates a service over a store and a notification sink
    pub fn new(store: Arc<dyn CustomerStore>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self { store, notifications }
    }

    /// Creates a customer
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::InvalidData` if the age does not match the
    /// birth date or a required field is missing, and `CustomerError::Store`
    /// if persistence fails.
    pub async fn create(&self, request: &CreateCustomerRequest) -> Result<CustomerView, CustomerError> {
        ensure_age_matches(request.age, request.birth_date)?;

        let mut record = CustomerMapper::to_record(Some(request))?;
        record.refresh_milestone_date()?;

        let saved = self.store.save(record).await?;
        info!(customer_id = ?saved.id, "Customer created");

        self.notify(CustomerEvent::Created(saved.clone())).await;
        Ok(CustomerView::from(saved))
    }

    /// Lists every customer, newest first
    pub async fn get_all(&self) -> Result<Vec<CustomerView>, CustomerError> {
        let records = self.store.find_all_order_by_creation_desc().await?;
        debug!(count = records.len(), "Listed customers");
        Ok(records.into_iter().map(CustomerView::from).collect())
    }

    /// Fetches one customer
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has this id.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<CustomerView, CustomerError> {
        self.find_existing(id).await.map(CustomerView::from)
    }

    /// Applies a partial update
    ///
    /// Only the fields present in `request` change. The age/birth-date rule is
    /// re-checked when both values are supplied, and the milestone date is
    /// recomputed whenever a birth date is supplied.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has this id and
    /// `CustomerError::InvalidData` if the update is rejected.
    pub async fn update(
        &self,
        id: CustomerId,
        request: &UpdateCustomerRequest,
    ) -> Result<CustomerView, CustomerError> {
        let mut record = self.find_existing(id).await?;

        if request.has_age_and_birth_date() {
            ensure_age_matches(request.age, request.birth_date)?;
        }

        CustomerMapper::apply_update(Some(&mut record), Some(request))?;
        if request.birth_date.is_some() {
            record.refresh_milestone_date()?;
        }

        let saved = self
            .store
            .save(record)
            .await
            .map_err(|e| vanished_as_not_found(e, id))?;
        info!(customer_id = %id, "Customer updated");

        self.notify(CustomerEvent::Updated(saved.clone())).await;
        Ok(CustomerView::from(saved))
    }

    /// Deletes a customer
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has this id.
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        let record = self.find_existing(id).await?;
        self.store
            .delete(&record)
            .await
            .map_err(|e| vanished_as_not_found(e, id))?;
        info!(customer_id = %id, "Customer deleted");

        self.notify(CustomerEvent::Deleted(id)).await;
        Ok(())
    }

    /// Computes age statistics over all customers
    pub async fn get_stats(&self) -> Result<CustomerStats, CustomerError> {
        Ok(CustomerStats {
            average_age: self.store.average_age().await?,
            age_standard_deviation: self.store.age_standard_deviation().await?,
            total_count: self.store.count().await?,
        })
    }

    /// Mean age, `None` when there are no customers
    pub async fn get_average_age(&self) -> Result<Option<f64>, CustomerError> {
        Ok(self.store.average_age().await?)
    }

    /// Population standard deviation of ages, `None` when there are no customers
    pub async fn get_age_standard_deviation(&self) -> Result<Option<f64>, CustomerError> {
        Ok(self.store.age_standard_deviation().await?)
    }

    /// Reports the health of the backing store
    pub async fn health_check(&self) -> HealthCheckResult {
        self.store.health_check().await
    }

    async fn find_existing(&self, id: CustomerId) -> Result<CustomerRecord, CustomerError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    async fn notify(&self, event: CustomerEvent) {
        let topic = event.topic();
        let payload = match event.payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(topic, error = %e, "Failed to encode customer notification");
                return;
            }
        };

        match self.notifications.publish(topic, &payload).await {
            Ok(()) => info!(topic, "Customer notification published"),
            Err(e) => warn!(topic, error = %e, "Customer notification failed"),
        }
    }
}

fn ensure_age_matches(age: Option<i32>, birth_date: Option<NaiveDate>) -> Result<(), CustomerError> {
    let today = today_utc();
    if AgeBirthDateInvariant::check_on(age, birth_date, today) {
        return Ok(());
    }

    // check_on only fails when both values are present
    let (Some(age), Some(birth_date)) = (age, birth_date) else {
        return Ok(());
    };
    Err(CustomerError::InvalidData(format!(
        "Age {} does not match birth date {} (calculated age: {})",
        age,
        birth_date,
        AgeBirthDateInvariant::calculated_age(birth_date, today)
    )))
}

/// A row removed between lookup and write is reported as the missing customer
fn vanished_as_not_found(error: PortError, id: CustomerId) -> CustomerError {
    if error.is_not_found() {
        CustomerError::NotFound(id)
    } else {
        CustomerError::Store(error)
    }
}
