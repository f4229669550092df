//! Customer domain errors
//!
//! Service operations fail with [`CustomerError`]. Notification failures use
//! the separate [`NotificationError`] and never reach service callers.

use thiserror::Error;

use core_kernel::{CustomerId, PortError, TemporalError};

/// Errors returned by `CustomerService` operations
#[derive(Debug, Error)]
pub enum CustomerError {
    /// No customer exists with the given identifier
    #[error("Customer not found with ID: {0}")]
    NotFound(CustomerId),

    /// The supplied data failed a domain or mapping rule
    #[error("{0}")]
    InvalidData(String),

    /// The store failed for a reason unrelated to the request
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl CustomerError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        CustomerError::InvalidData(message.into())
    }

    /// Returns true if this error should be reported to clients as a 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, CustomerError::NotFound(_))
    }
}

impl From<TemporalError> for CustomerError {
    fn from(error: TemporalError) -> Self {
        CustomerError::InvalidData(error.to_string())
    }
}

/// Errors raised by notification sinks
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The payload could not be encoded for the transport
    #[error("Failed to encode notification for topic {topic}: {message}")]
    Encoding { topic: String, message: String },

    /// The broker could not be reached or rejected the publish
    #[error("Failed to publish notification to topic {topic}: {message}")]
    Delivery { topic: String, message: String },

    /// The publish did not complete in time
    #[error("Publishing to topic {topic} timed out after {duration_ms}ms")]
    Timeout { topic: String, duration_ms: u64 },
}

impl NotificationError {
    /// Creates a Delivery error
    pub fn delivery(topic: impl Into<String>, message: impl Into<String>) -> Self {
        NotificationError::Delivery {
            topic: topic.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = CustomerError::NotFound(CustomerId::new(42));
        assert_eq!(error.to_string(), "Customer not found with ID: 42");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_invalid_data_message_is_verbatim() {
        let error = CustomerError::invalid("First name cannot be empty");
        assert_eq!(error.to_string(), "First name cannot be empty");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_port_error_converts_to_store() {
        let error: CustomerError = PortError::connection("pool closed").into();
        assert!(matches!(error, CustomerError::Store(_)));
    }
}
