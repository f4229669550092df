//! Customer change notifications

use serde_json::Value;

use core_kernel::CustomerId;

use crate::customer::CustomerRecord;

/// Topic names for customer notifications
pub mod topics {
    pub const CUSTOMER_CREATED: &str = "customer.created";
    pub const CUSTOMER_UPDATED: &str = "customer.updated";
    pub const CUSTOMER_DELETED: &str = "customer.deleted";

    /// Every topic a sink may be asked to publish to
    pub const ALL: [&str; 3] = [CUSTOMER_CREATED, CUSTOMER_UPDATED, CUSTOMER_DELETED];
}

/// A change to a customer record, emitted after the store confirmed it
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerEvent {
    Created(CustomerRecord),
    Updated(CustomerRecord),
    Deleted(CustomerId),
}

impl CustomerEvent {
    /// Returns the topic this event is published to
    pub fn topic(&self) -> &'static str {
        match self {
            CustomerEvent::Created(_) => topics::CUSTOMER_CREATED,
            CustomerEvent::Updated(_) => topics::CUSTOMER_UPDATED,
            CustomerEvent::Deleted(_) => topics::CUSTOMER_DELETED,
        }
    }

    /// Returns the JSON payload: the saved record, or the bare id for deletes
    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            CustomerEvent::Created(record) | CustomerEvent::Updated(record) => {
                serde_json::to_value(record)
            }
            CustomerEvent::Deleted(id) => Ok(Value::from(id.value())),
        }
    }
}
