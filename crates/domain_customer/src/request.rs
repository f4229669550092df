//! Inbound create and update payloads
//!
//! Every field is an `Option` on both requests. For creation this lets a
//! missing field surface as a field-level validation message instead of a
//! deserialization failure. For updates `None` is the "leave unchanged"
//! marker: a JSON field that is absent or `null` never touches the record,
//! while `Some("")` is a present value that validation and the mapper reject.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to create a customer; all four fields are required
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl CreateCustomerRequest {
    /// Creates a request with every field present
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            age: Some(age),
            birth_date: Some(birth_date),
        }
    }
}

/// Partial update; only the present fields are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl UpdateCustomerRequest {
    /// Returns true when no field is present
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.birth_date.is_none()
    }

    /// Returns true when the update carries both sides of the age/birth-date pair
    pub fn has_age_and_birth_date(&self) -> bool {
        self.age.is_some() && self.birth_date.is_some()
    }
}
