//! Messaging Infrastructure
//!
//! Publishes customer change notifications to RabbitMQ over AMQP 0-9-1.
//!
//! # Topology
//!
//! ```text
//!                         ┌──────────────────────────┐
//!  customer.created ───▶  │                          │ ──▶ customer.created.queue
//!  customer.updated ───▶  │  customer.events (topic) │ ──▶ customer.updated.queue
//!  customer.deleted ───▶  │                          │ ──▶ customer.deleted.queue
//!                         └──────────────────────────┘
//! ```
//!
//! The exchange and queues are durable; each queue is bound with its topic as
//! routing key. Delivery is at-most-once: a publish is attempted once under a
//! timeout and the caller decides what to do with a failure.

pub mod config;
pub mod error;
pub mod publisher;

pub use config::AmqpConfig;
pub use error::MessagingError;
pub use publisher::{queue_name, AmqpNotificationSink};
