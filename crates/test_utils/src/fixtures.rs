//! Pre-built Test Fixtures
//!
//! Provides ready-to-use customers and reference dates. Dates are computed
//! relative to today's UTC date so that age checks stay valid whenever the
//! suite runs.

use chrono::{Days, Months, NaiveDate};
use core_kernel::{today_utc, CustomerId};
use domain_customer::{CreateCustomerRequest, CustomerRecord};

/// Fixture for reference dates
pub struct DateFixtures;

impl DateFixtures {
    /// Today's UTC date
    pub fn today() -> NaiveDate {
        today_utc()
    }

    /// Exactly `years` calendar years before today
    ///
    /// A customer born on this date is `years` old today.
    pub fn years_ago(years: u32) -> NaiveDate {
        today_utc()
            .checked_sub_months(Months::new(years * 12))
            .expect("date within chrono range")
    }

    /// The day after today
    pub fn tomorrow() -> NaiveDate {
        today_utc()
            .checked_add_days(Days::new(1))
            .expect("date within chrono range")
    }

    /// The day before today
    pub fn yesterday() -> NaiveDate {
        today_utc()
            .checked_sub_days(Days::new(1))
            .expect("date within chrono range")
    }
}

/// Fixture for customer data
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// A valid 30 year old customer
    pub fn juan() -> CreateCustomerRequest {
        CreateCustomerRequest::new("Juan", "Pérez", 30, DateFixtures::years_ago(30))
    }

    /// A valid 45 year old customer with accented names
    pub fn maria() -> CreateCustomerRequest {
        CreateCustomerRequest::new("María José", "Núñez", 45, DateFixtures::years_ago(45))
    }

    /// A valid 22 year old customer
    pub fn luis() -> CreateCustomerRequest {
        CreateCustomerRequest::new("Luis", "Gómez", 22, DateFixtures::years_ago(22))
    }

    /// Age 30 with a birth date 25 years ago
    pub fn mismatched_age() -> CreateCustomerRequest {
        CreateCustomerRequest::new("Juan", "Pérez", 30, DateFixtures::years_ago(25))
    }

    /// An unsaved record for a 30 year old customer
    pub fn record() -> CustomerRecord {
        CustomerRecord::new("Juan", "Pérez", 30, DateFixtures::years_ago(30))
    }

    /// An id no fixture store ever assigns
    pub fn missing_id() -> CustomerId {
        CustomerId::new(999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::years_between;

    #[test]
    fn test_years_ago_is_exact_age() {
        for years in [0, 1, 30, 65, 150] {
            assert_eq!(years_between(DateFixtures::years_ago(years), DateFixtures::today()), years as i32);
        }
    }

    #[test]
    fn test_relative_days() {
        assert!(DateFixtures::yesterday() < DateFixtures::today());
        assert!(DateFixtures::tomorrow() > DateFixtures::today());
    }
}
