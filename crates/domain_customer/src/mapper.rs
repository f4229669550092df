//! Conversions between requests, records and views
//!
//! The mapper is null-safe at every entry point: absent inputs are handled
//! explicitly rather than assumed away, which is what lets partial updates
//! distinguish "not supplied" from "supplied but empty".

use crate::customer::{CustomerRecord, CustomerView};
use crate::error::CustomerError;
use crate::request::{CreateCustomerRequest, UpdateCustomerRequest};

pub mod messages {
    pub const CUSTOMER_DATA_NULL: &str = "Customer data cannot be null";
    pub const FIRST_NAME_NULL_OR_EMPTY: &str = "First name cannot be null or empty";
    pub const LAST_NAME_NULL_OR_EMPTY: &str = "Last name cannot be null or empty";
    pub const AGE_NULL: &str = "Age cannot be null";
    pub const BIRTH_DATE_NULL: &str = "Birth date cannot be null";
    pub const ENTITY_NULL_FOR_UPDATE: &str = "Customer entity cannot be null for update";
    pub const FIRST_NAME_EMPTY: &str = "First name cannot be empty";
    pub const LAST_NAME_EMPTY: &str = "Last name cannot be empty";
}

/// Stateless mapper for customer data
pub struct CustomerMapper;

impl CustomerMapper {
    /// Copies a record into its outward view
    pub fn to_view(record: Option<&CustomerRecord>) -> Option<CustomerView> {
        record.map(CustomerView::from)
    }

    /// Builds an unsaved record from a create request
    ///
    /// Names are trimmed. The record has no id, no timestamps and no
    /// milestone date.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::InvalidData` when the request is absent or a
    /// required field is missing or blank.
    pub fn to_record(request: Option<&CreateCustomerRequest>) -> Result<CustomerRecord, CustomerError> {
        let request = request.ok_or_else(|| CustomerError::invalid(messages::CUSTOMER_DATA_NULL))?;

        let first_name = required_name(request.first_name.as_deref(), messages::FIRST_NAME_NULL_OR_EMPTY)?;
        let last_name = required_name(request.last_name.as_deref(), messages::LAST_NAME_NULL_OR_EMPTY)?;
        let age = request.age.ok_or_else(|| CustomerError::invalid(messages::AGE_NULL))?;
        let birth_date = request
            .birth_date
            .ok_or_else(|| CustomerError::invalid(messages::BIRTH_DATE_NULL))?;

        Ok(CustomerRecord::new(first_name, last_name, age, birth_date))
    }

    /// Applies the present fields of an update request to a record
    ///
    /// An absent request is a no-op. Names are checked before anything is
    /// written, so a rejected update leaves the record untouched.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::InvalidData` when the record is absent but the
    /// request is not, or when a present name is empty after trimming.
    pub fn apply_update(
        record: Option<&mut CustomerRecord>,
        request: Option<&UpdateCustomerRequest>,
    ) -> Result<(), CustomerError> {
        let Some(request) = request else {
            return Ok(());
        };
        let record = record.ok_or_else(|| CustomerError::invalid(messages::ENTITY_NULL_FOR_UPDATE))?;

        let first_name = present_name(request.first_name.as_deref(), messages::FIRST_NAME_EMPTY)?;
        let last_name = present_name(request.last_name.as_deref(), messages::LAST_NAME_EMPTY)?;

        if let Some(first_name) = first_name {
            record.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            record.last_name = last_name;
        }
        if let Some(age) = request.age {
            record.age = age;
        }
        if let Some(birth_date) = request.birth_date {
            record.birth_date = birth_date;
        }

        Ok(())
    }
}

fn required_name(value: Option<&str>, message: &'static str) -> Result<String, CustomerError> {
    match value.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(CustomerError::invalid(message)),
    }
}

fn present_name(value: Option<&str>, message: &'static str) -> Result<Option<String>, CustomerError> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Err(CustomerError::invalid(message)),
        Some(name) => Ok(Some(name.to_string())),
    }
}
