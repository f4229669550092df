//! AMQP notification sink
//!
//! The sink opens its connection lazily on the first publish and keeps one
//! channel behind a mutex. A failed or timed-out publish drops the session,
//! so the next publish reconnects and re-declares the topology.

use async_trait::async_trait;
use lapin::options::{
    BasicPublishOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use core_kernel::DomainPort;
use domain_customer::{topics, NotificationError, NotificationSink};

use crate::config::AmqpConfig;
use crate::error::MessagingError;

const CONTENT_TYPE_JSON: &str = "application/json";
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Queue bound to a topic: the topic name with a `.queue` suffix
pub fn queue_name(topic: &str) -> String {
    format!("{topic}.queue")
}

struct AmqpSession {
    // Held so the connection outlives the channel
    _connection: Connection,
    channel: Channel,
}

/// `NotificationSink` publishing JSON messages to a RabbitMQ topic exchange
pub struct AmqpNotificationSink {
    config: AmqpConfig,
    session: Mutex<Option<AmqpSession>>,
}

impl AmqpNotificationSink {
    /// Creates a sink; no connection is made until the first publish
    pub fn new(config: AmqpConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    /// Connects and declares the topology now instead of on first publish
    ///
    /// # Errors
    ///
    /// Returns `MessagingError` if the broker is unreachable or a declaration
    /// fails.
    pub async fn connect(&self) -> Result<(), MessagingError> {
        let mut session = self.session.lock().await;
        if session.is_none() {
            *session = Some(open_session(&self.config).await?);
        }
        Ok(())
    }

    async fn publish_bytes(&self, topic: &str, body: &[u8]) -> Result<(), MessagingError> {
        let mut slot = self.session.lock().await;
        // Taken out for the duration of the publish; only put back on success
        let session = match slot.take() {
            Some(session) => session,
            None => open_session(&self.config).await?,
        };

        let properties = BasicProperties::default()
            .with_content_type(CONTENT_TYPE_JSON.into())
            .with_delivery_mode(DELIVERY_MODE_PERSISTENT)
            .with_message_id(Uuid::new_v4().to_string().into());

        // The confirm future is dropped: delivery is at-most-once
        session
            .channel
            .basic_publish(
                &self.config.exchange,
                topic,
                BasicPublishOptions::default(),
                body,
                properties,
            )
            .await
            .map_err(MessagingError::Publish)?;

        *slot = Some(session);
        Ok(())
    }
}

impl DomainPort for AmqpNotificationSink {}

#[async_trait]
impl NotificationSink for AmqpNotificationSink {
    async fn publish(&self, topic: &str, payload: &Value) -> Result<(), NotificationError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| MessagingError::from(e).into_notification(topic))?;

        let timeout = self.config.publish_timeout;
        let outcome = match tokio::time::timeout(timeout, self.publish_bytes(topic, &body)).await {
            Ok(result) => result,
            Err(_) => Err(MessagingError::Timeout {
                duration_ms: timeout.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(()) => {
                debug!(topic, bytes = body.len(), "Published AMQP message");
                Ok(())
            }
            Err(e) => {
                warn!(topic, error = %e, "AMQP publish failed, session dropped");
                Err(e.into_notification(topic))
            }
        }
    }
}

async fn open_session(config: &AmqpConfig) -> Result<AmqpSession, MessagingError> {
    info!(exchange = %config.exchange, "Connecting to AMQP broker");

    let properties =
        ConnectionProperties::default().with_connection_name(config.connection_name.clone().into());
    let connection = Connection::connect(&config.url, properties)
        .await
        .map_err(MessagingError::Connection)?;
    let channel = connection
        .create_channel()
        .await
        .map_err(MessagingError::Connection)?;

    declare_topology(&channel, &config.exchange).await?;
    info!(exchange = %config.exchange, "AMQP topology declared");

    Ok(AmqpSession {
        _connection: connection,
        channel,
    })
}

async fn declare_topology(channel: &Channel, exchange: &str) -> Result<(), MessagingError> {
    channel
        .exchange_declare(
            exchange,
            ExchangeKind::Topic,
            ExchangeDeclareOptions {
                durable: true,
                ..ExchangeDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await
        .map_err(|source| MessagingError::Topology {
            object: format!("exchange {exchange}"),
            source,
        })?;

    for topic in topics::ALL {
        let queue = queue_name(topic);
        channel
            .queue_declare(
                &queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|source| MessagingError::Topology {
                object: format!("queue {queue}"),
                source,
            })?;

        channel
            .queue_bind(
                &queue,
                exchange,
                topic,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|source| MessagingError::Topology {
                object: format!("binding {queue} <- {topic}"),
                source,
            })?;
    }

    Ok(())
}
