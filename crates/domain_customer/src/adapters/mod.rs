//! Built-in adapters for the customer domain
//!
//! - **TracingNotificationSink**: writes notifications to the log instead of a
//!   broker; used when no broker URL is configured
//! - In-memory store and mock sinks live in [`crate::ports::mock`]

pub mod tracing_sink;

pub use tracing_sink::TracingNotificationSink;
