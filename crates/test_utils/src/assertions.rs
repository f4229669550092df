//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for customer types that give
//! more meaningful error messages than standard assertions.

use domain_customer::{CreateCustomerRequest, CustomerError, CustomerView};

/// Asserts that two f64 values are equal within a tolerance
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a view carries the trimmed names, age and birth date of a request
pub fn assert_view_matches_request(view: &CustomerView, request: &CreateCustomerRequest) {
    assert_eq!(
        Some(view.first_name.as_str()),
        request.first_name.as_deref().map(str::trim),
        "First name mismatch"
    );
    assert_eq!(
        Some(view.last_name.as_str()),
        request.last_name.as_deref().map(str::trim),
        "Last name mismatch"
    );
    assert_eq!(Some(view.age), request.age, "Age mismatch");
    assert_eq!(Some(view.birth_date), request.birth_date, "Birth date mismatch");
}

/// Asserts that two views agree on every field except the update timestamp
pub fn assert_same_customer(actual: &CustomerView, expected: &CustomerView) {
    assert_eq!(actual.id, expected.id, "Id mismatch");
    assert_eq!(actual.first_name, expected.first_name, "First name mismatch");
    assert_eq!(actual.last_name, expected.last_name, "Last name mismatch");
    assert_eq!(actual.age, expected.age, "Age mismatch");
    assert_eq!(actual.birth_date, expected.birth_date, "Birth date mismatch");
    assert_eq!(
        actual.estimated_milestone_date, expected.estimated_milestone_date,
        "Milestone date mismatch"
    );
    assert_eq!(
        actual.creation_timestamp, expected.creation_timestamp,
        "Creation timestamp mismatch"
    );
}

/// Asserts that a result is `CustomerError::InvalidData` with the given message
pub fn assert_invalid_data<T: std::fmt::Debug>(result: Result<T, CustomerError>, expected: &str) {
    match result {
        Err(CustomerError::InvalidData(message)) => assert_eq!(
            message, expected,
            "InvalidData message mismatch"
        ),
        other => panic!("Expected InvalidData({expected:?}), got {other:?}"),
    }
}

/// Asserts that a result is `CustomerError::NotFound`
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, CustomerError>) {
    match result {
        Err(CustomerError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {other:?}"),
    }
}
