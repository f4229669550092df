//! Messaging error types

use domain_customer::NotificationError;
use thiserror::Error;

/// Errors raised while talking to the broker
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Opening the connection or channel failed
    #[error("Failed to connect to broker: {0}")]
    Connection(#[source] lapin::Error),

    /// Declaring the exchange, a queue or a binding failed
    #[error("Failed to declare {object}: {source}")]
    Topology {
        object: String,
        #[source]
        source: lapin::Error,
    },

    /// The broker rejected or dropped the publish
    #[error("Failed to publish: {0}")]
    Publish(#[source] lapin::Error),

    /// The payload could not be serialized
    #[error("Failed to encode payload: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Connecting and publishing did not finish in time
    #[error("Timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

impl MessagingError {
    /// Converts into the domain notification error for a topic
    pub fn into_notification(self, topic: &str) -> NotificationError {
        match self {
            MessagingError::Encoding(e) => NotificationError::Encoding {
                topic: topic.to_string(),
                message: e.to_string(),
            },
            MessagingError::Timeout { duration_ms } => NotificationError::Timeout {
                topic: topic.to_string(),
                duration_ms,
            },
            other => NotificationError::delivery(topic, other.to_string()),
        }
    }
}
