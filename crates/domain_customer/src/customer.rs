//! Customer record and its outward representations
//!
//! `CustomerRecord` is the persisted shape, owned exclusively by the store.
//! `CustomerView` is what the service hands back to callers and
//! `CustomerStats` carries the store-computed aggregates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{plus_years, CustomerId, TemporalError};

/// Years added to the birth date to derive the estimated milestone date
pub const MILESTONE_AGE_YEARS: u32 = 65;

/// A customer as persisted by the store
///
/// `id` and both timestamps are `None` until the store has saved the record
/// once. The service never sets them itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    /// Store-assigned identifier, immutable once set
    pub id: Option<CustomerId>,
    /// Trimmed first name
    pub first_name: String,
    /// Trimmed last name
    pub last_name: String,
    /// Age in years as declared by the customer
    pub age: i32,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Derived from `birth_date`, see [`MILESTONE_AGE_YEARS`]
    pub estimated_milestone_date: Option<NaiveDate>,
    /// Set once, when the store first inserts the record
    pub creation_timestamp: Option<DateTime<Utc>>,
    /// Refreshed by the store on every save
    pub update_timestamp: Option<DateTime<Utc>>,
}

impl CustomerRecord {
    /// Creates an unsaved record with no derived or audit fields
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            birth_date,
            estimated_milestone_date: None,
            creation_timestamp: None,
            update_timestamp: None,
        }
    }

    /// Recomputes `estimated_milestone_date` from the current birth date
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::DateOverflow` if the milestone falls outside
    /// the representable calendar.
    pub fn refresh_milestone_date(&mut self) -> Result<(), TemporalError> {
        self.estimated_milestone_date = Some(plus_years(self.birth_date, MILESTONE_AGE_YEARS)?);
        Ok(())
    }
}

/// Externally visible shape of a customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub birth_date: NaiveDate,
    pub estimated_milestone_date: Option<NaiveDate>,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub update_timestamp: Option<DateTime<Utc>>,
}

impl From<&CustomerRecord> for CustomerView {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            age: record.age,
            birth_date: record.birth_date,
            estimated_milestone_date: record.estimated_milestone_date,
            creation_timestamp: record.creation_timestamp,
            update_timestamp: record.update_timestamp,
        }
    }
}

impl From<CustomerRecord> for CustomerView {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
            birth_date: record.birth_date,
            estimated_milestone_date: record.estimated_milestone_date,
            creation_timestamp: record.creation_timestamp,
            update_timestamp: record.update_timestamp,
        }
    }
}

/// Age statistics over the full record set
///
/// Average and standard deviation are `None` when there are no customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    /// Mean age
    pub average_age: Option<f64>,
    /// Population standard deviation of ages
    pub age_standard_deviation: Option<f64>,
    /// Number of stored customers
    pub total_count: i64,
}
