//! Calendar helpers
//!
//! Every "today" in the service is the current date in UTC. Age checks,
//! birth-date checks and derived dates all go through these functions so that
//! no call site ever reads the local clock.

use chrono::{Datelike, Months, NaiveDate, Utc};
use thiserror::Error;

/// Errors related to calendar arithmetic
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Date overflow adding {years} years to {date}")]
    DateOverflow { date: NaiveDate, years: u32 },
}

/// Returns the current date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Counts whole calendar years from `from` to `to`
///
/// A year only counts once its anniversary has been reached, so a person born
/// on 2000-06-15 is 23 on 2024-06-14 and 24 on 2024-06-15. The result is
/// negative when `from` is after `to`, with the same truncation toward zero.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::years_between;
///
/// let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
/// let day_before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// assert_eq!(years_between(birth, day_before), 23);
/// ```
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    if from > to {
        return -years_between(to, from);
    }

    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Adds whole years to a date
///
/// A February 29 source date lands on February 28 in non-leap target years.
///
/// # Errors
///
/// Returns `TemporalError::DateOverflow` if the result is outside chrono's
/// supported range.
pub fn plus_years(date: NaiveDate, years: u32) -> Result<NaiveDate, TemporalError> {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
        .ok_or(TemporalError::DateOverflow { date, years })
}
