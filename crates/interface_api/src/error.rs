//! API error handling
//!
//! Every failure leaves the API as an [`ErrorResponse`] body. Internal
//! details are logged, never returned.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use core_kernel::PortError;
use domain_customer::{error_messages, CustomerError};

/// Message returned for every unexpected failure
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message returned alongside field validation errors
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0:?}")]
    Validation(BTreeMap<String, String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, errors) = match self {
            ApiError::Validation(errors) => {
                warn!(?errors, "Validation errors");
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    VALIDATION_ERROR_MESSAGE.to_string(),
                    Some(errors),
                )
            }
            ApiError::BadRequest(msg) => {
                warn!(message = %msg, "Invalid data provided");
                (StatusCode::BAD_REQUEST, "bad_request", msg, None)
            }
            ApiError::NotFound(msg) => {
                warn!(message = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, "not_found", msg, None)
            }
            ApiError::Conflict(msg) => {
                warn!(message = %msg, "Data conflict");
                (StatusCode::CONFLICT, "conflict", msg, None)
            }
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Unexpected error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    UNEXPECTED_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            error: error_type.to_string(),
            message,
            timestamp: Utc::now(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(error_messages(&errors))
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CustomerError::InvalidData(message) => ApiError::BadRequest(message),
            CustomerError::Store(PortError::Conflict { message }) => ApiError::Conflict(message),
            CustomerError::Store(other) => ApiError::Internal(other.to_string()),
        }
    }
}
