//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::CustomerId;
use domain_customer::{CreateCustomerRequest, CustomerRecord, UpdateCustomerRequest};

use crate::fixtures::DateFixtures;

/// Builder for create requests
///
/// Starts from a valid 30 year old customer; `without_*` methods drop a field.
pub struct CreateRequestBuilder {
    request: CreateCustomerRequest,
}

impl Default for CreateRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            request: CreateCustomerRequest::new("Juan", "Pérez", 30, DateFixtures::years_ago(30)),
        }
    }

    /// Sets the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.request.first_name = Some(name.into());
        self
    }

    /// Sets the last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.request.last_name = Some(name.into());
        self
    }

    /// Sets the age
    pub fn with_age(mut self, age: i32) -> Self {
        self.request.age = Some(age);
        self
    }

    /// Sets the birth date
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.request.birth_date = Some(date);
        self
    }

    /// Sets age and a birth date exactly `age` years ago
    pub fn aged(self, age: u32) -> Self {
        self.with_age(age as i32).with_birth_date(DateFixtures::years_ago(age))
    }

    pub fn without_first_name(mut self) -> Self {
        self.request.first_name = None;
        self
    }

    pub fn without_last_name(mut self) -> Self {
        self.request.last_name = None;
        self
    }

    pub fn without_age(mut self) -> Self {
        self.request.age = None;
        self
    }

    pub fn without_birth_date(mut self) -> Self {
        self.request.birth_date = None;
        self
    }

    /// Builds the request
    pub fn build(self) -> CreateCustomerRequest {
        self.request
    }
}

/// Builder for partial updates; starts empty
#[derive(Default)]
pub struct UpdateRequestBuilder {
    request: UpdateCustomerRequest,
}

impl UpdateRequestBuilder {
    /// Creates a builder with no fields present
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.request.first_name = Some(name.into());
        self
    }

    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.request.last_name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.request.age = Some(age);
        self
    }

    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.request.birth_date = Some(date);
        self
    }

    /// Builds the request
    pub fn build(self) -> UpdateCustomerRequest {
        self.request
    }
}

/// Builder for stored records
pub struct CustomerRecordBuilder {
    record: CustomerRecord,
}

impl Default for CustomerRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRecordBuilder {
    /// Creates a new builder for an unsaved 30 year old customer
    pub fn new() -> Self {
        Self {
            record: CustomerRecord::new("Juan", "Pérez", 30, DateFixtures::years_ago(30)),
        }
    }

    /// Sets the store id
    pub fn with_id(mut self, id: i64) -> Self {
        self.record.id = Some(CustomerId::new(id));
        self
    }

    /// Sets both names
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.record.first_name = first_name.into();
        self.record.last_name = last_name.into();
        self
    }

    /// Sets age and a birth date exactly `age` years ago
    pub fn aged(mut self, age: u32) -> Self {
        self.record.age = age as i32;
        self.record.birth_date = DateFixtures::years_ago(age);
        self
    }

    /// Builds the record
    pub fn build(self) -> CustomerRecord {
        self.record
    }
}
