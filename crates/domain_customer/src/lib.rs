//! Customer Management Domain
//!
//! This crate holds the customer record, the rules a customer must satisfy
//! and the use cases that create, read, update and delete customers.
//!
//! # Core rules
//!
//! - **Age vs birth date**: a declared age may differ from the whole years
//!   since the birth date by at most one. [`AgeBirthDateInvariant`] is the only
//!   implementation; request validation and [`CustomerService`] both call it.
//! - **Partial updates**: [`UpdateCustomerRequest`] fields are optional. An
//!   absent field is left unchanged, a present name that is blank is rejected.
//! - **Best-effort notifications**: every successful write publishes a
//!   [`CustomerEvent`] through the [`NotificationSink`] port; failures are
//!   logged and never surface to callers.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_customer::{CreateCustomerRequest, CustomerMapper};
//!
//! let request = CreateCustomerRequest::new(
//!     " Juan ",
//!     "Pérez",
//!     30,
//!     NaiveDate::from_ymd_opt(1994, 1, 1).unwrap(),
//! );
//!
//! let record = CustomerMapper::to_record(Some(&request)).unwrap();
//! assert_eq!(record.first_name, "Juan");
//! assert!(record.id.is_none());
//! ```

pub mod adapters;
pub mod customer;
pub mod error;
pub mod events;
pub mod mapper;
pub mod ports;
pub mod request;
pub mod service;
pub mod validation;

pub use adapters::TracingNotificationSink;
pub use customer::{CustomerRecord, CustomerStats, CustomerView, MILESTONE_AGE_YEARS};
pub use error::{CustomerError, NotificationError};
pub use events::{topics, CustomerEvent};
pub use mapper::CustomerMapper;
pub use ports::{CustomerStore, NotificationSink};
pub use request::{CreateCustomerRequest, UpdateCustomerRequest};
pub use service::CustomerService;
pub use validation::{error_messages, AgeBirthDateInvariant, OBJECT_LEVEL_KEY};
