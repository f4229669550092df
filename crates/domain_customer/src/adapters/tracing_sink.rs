//! Log-only notification sink

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use core_kernel::DomainPort;

use crate::error::NotificationError;
use crate::ports::NotificationSink;

/// Sink that logs each notification at `info` and never fails
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TracingNotificationSink {}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn publish(&self, topic: &str, payload: &Value) -> Result<(), NotificationError> {
        info!(topic, %payload, "Customer notification (no broker configured)");
        Ok(())
    }
}
