//! Property-Based Test Generators
//!
//! Provides proptest strategies for customer data. Dates are generated
//! relative to today's UTC date.

use chrono::{Days, NaiveDate};
use core_kernel::{today_utc, years_between};
use domain_customer::{CreateCustomerRequest, UpdateCustomerRequest};
use proptest::option;
use proptest::prelude::*;

/// Oldest birth date offset generated, a little over 150 years
const MAX_DAYS_AGO: u64 = 55_000;

/// Strategy for names accepted by request validation
pub fn valid_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-ZáéíóúÁÉÍÓÚñÑ]{2,20}( [a-zA-Z]{2,20})?"
}

/// Strategy for valid names wrapped in leading and trailing whitespace
pub fn padded_name_strategy() -> impl Strategy<Value = String> {
    (" {0,3}", valid_name_strategy(), " {0,3}")
        .prop_map(|(left, name, right)| format!("{left}{name}{right}"))
}

/// Strategy for strings that are empty after trimming
pub fn blank_name_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,5}"
}

/// Strategy for ages accepted by request validation
pub fn age_strategy() -> impl Strategy<Value = i32> {
    0i32..=150
}

/// Strategy for birth dates strictly before today
pub fn past_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u64..=MAX_DAYS_AGO).prop_map(days_ago)
}

/// Strategy for any date within ~150 years either side of today
pub fn any_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (-(MAX_DAYS_AGO as i64)..=(MAX_DAYS_AGO as i64)).prop_map(|offset| {
        if offset >= 0 {
            days_ago(offset as u64)
        } else {
            today_utc()
                .checked_add_days(Days::new(offset.unsigned_abs()))
                .expect("date within chrono range")
        }
    })
}

/// Strategy for (age, birth date) pairs whose age is within one year of the
/// calculated age and inside the accepted age range
pub fn consistent_age_strategy() -> impl Strategy<Value = (i32, NaiveDate)> {
    (past_date_strategy(), -1i32..=1).prop_filter_map("age out of range", |(birth, delta)| {
        let age = years_between(birth, today_utc()) + delta;
        (0..=150).contains(&age).then_some((age, birth))
    })
}

/// Strategy for create requests that pass every validation rule
pub fn valid_create_request_strategy() -> impl Strategy<Value = CreateCustomerRequest> {
    (valid_name_strategy(), valid_name_strategy(), consistent_age_strategy()).prop_map(
        |(first_name, last_name, (age, birth_date))| {
            CreateCustomerRequest::new(first_name, last_name, age, birth_date)
        },
    )
}

/// Strategy for update requests with any subset of fields present
pub fn update_request_strategy() -> impl Strategy<Value = UpdateCustomerRequest> {
    (
        option::of(padded_name_strategy()),
        option::of(padded_name_strategy()),
        option::of(age_strategy()),
        option::of(past_date_strategy()),
    )
        .prop_map(|(first_name, last_name, age, birth_date)| UpdateCustomerRequest {
            first_name,
            last_name,
            age,
            birth_date,
        })
}

fn days_ago(days: u64) -> NaiveDate {
    today_utc()
        .checked_sub_days(Days::new(days))
        .expect("date within chrono range")
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn past_dates_are_before_today(date in past_date_strategy()) {
            prop_assert!(date < today_utc());
        }

        #[test]
        fn consistent_ages_stay_in_range((age, birth) in consistent_age_strategy()) {
            prop_assert!((0..=150).contains(&age));
            prop_assert!((age - years_between(birth, today_utc())).abs() <= 1);
        }

        #[test]
        fn blank_names_trim_to_empty(name in blank_name_strategy()) {
            prop_assert!(name.trim().is_empty());
        }
    }
}
