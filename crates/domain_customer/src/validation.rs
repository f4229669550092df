//! Customer validation rules
//!
//! This module holds the single implementation of the age/birth-date
//! consistency rule and the declarative field rules applied to inbound
//! requests before they reach the service.
//!
//! # Validation Rules
//!
//! ## Names
//! - Required on create, optional on update
//! - 2 to 50 characters
//! - Only ASCII letters, the accented letters `áéíóúÁÉÍÓÚñÑ` and whitespace
//!
//! ## Age
//! - Required on create, optional on update
//! - Between 0 and 150 inclusive
//!
//! ## Birth date
//! - Required on create, optional on update
//! - Strictly before today (UTC)
//!
//! ## Age vs birth date
//! - The declared age may differ from the whole years elapsed since the birth
//!   date by at most one year
//! - Only checked when both values are present and every field rule passed
//!
//! Each field reports at most one message; the first failing rule wins.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

use core_kernel::{today_utc, years_between};

use crate::request::{CreateCustomerRequest, UpdateCustomerRequest};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

/// Maximum difference in years between declared and calculated age
pub const AGE_TOLERANCE_YEARS: i64 = 1;

/// Letters accepted in names beyond ASCII
pub const ACCENTED_NAME_LETTERS: &str = "áéíóúÁÉÍÓÚñÑ";

/// Key under which object-level (cross-field) failures are reported
pub const OBJECT_LEVEL_KEY: &str = "validation";

/// Wire names of the validated fields
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const AGE: &str = "age";
    pub const BIRTH_DATE: &str = "birthDate";
}

/// Human-readable validation messages
pub mod messages {
    pub const FIRST_NAME_REQUIRED: &str = "First name is required";
    pub const LAST_NAME_REQUIRED: &str = "Last name is required";
    pub const AGE_REQUIRED: &str = "Age is required";
    pub const BIRTH_DATE_REQUIRED: &str = "Birth date is required";

    pub const FIRST_NAME_LENGTH: &str = "The first name must be between 2 and 50 characters long";
    pub const LAST_NAME_LENGTH: &str = "The last name must be between 2 and 50 characters long";
    pub const NAME_PATTERN: &str = "The name can only contain letters and spaces";

    pub const AGE_MIN: &str = "Age must be greater than or equal to 0";
    pub const AGE_MAX: &str = "Age must be less than or equal to 150";
    pub const BIRTH_DATE_PAST: &str = "Birth date must be in the past";

    pub const AGE_MISMATCH: &str = "Age does not match birth date";
}

/// The cross-field rule tying a declared age to a birth date
///
/// Both the request validators and `CustomerService` call this type; there is
/// no second copy of the arithmetic anywhere in the workspace.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use domain_customer::AgeBirthDateInvariant;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let birth = NaiveDate::from_ymd_opt(1994, 1, 1).unwrap();
///
/// assert!(AgeBirthDateInvariant::check_on(Some(30), Some(birth), today));
/// assert!(AgeBirthDateInvariant::check_on(Some(31), Some(birth), today));
/// assert!(!AgeBirthDateInvariant::check_on(Some(25), Some(birth), today));
/// assert!(AgeBirthDateInvariant::check_on(None, Some(birth), today));
/// ```
pub struct AgeBirthDateInvariant;

impl AgeBirthDateInvariant {
    /// Checks consistency against today's UTC date
    pub fn check(age: Option<i32>, birth_date: Option<NaiveDate>) -> bool {
        Self::check_on(age, birth_date, today_utc())
    }

    /// Checks consistency against an explicit reference date
    ///
    /// Returns `true` when either value is absent, since nothing can be judged.
    pub fn check_on(age: Option<i32>, birth_date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match (age, birth_date) {
            (Some(age), Some(birth_date)) => {
                let calculated = i64::from(years_between(birth_date, today));
                (i64::from(age) - calculated).abs() <= AGE_TOLERANCE_YEARS
            }
            _ => true,
        }
    }

    /// Whole years elapsed between the birth date and `today`
    pub fn calculated_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
        years_between(birth_date, today)
    }
}

/// Returns true if every character is allowed in a customer name
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphabetic() || c.is_ascii_whitespace() || ACCENTED_NAME_LETTERS.contains(c)
        })
}

/// Flattens validation errors into a field -> message map
///
/// Fields with several errors keep the first message.
pub fn error_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        if let Some(error) = field_errors.first() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            result.insert(field.to_string(), message);
        }
    }
    result
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

struct NameRule {
    required: &'static str,
    length: &'static str,
}

const FIRST_NAME_RULE: NameRule = NameRule {
    required: messages::FIRST_NAME_REQUIRED,
    length: messages::FIRST_NAME_LENGTH,
};

const LAST_NAME_RULE: NameRule = NameRule {
    required: messages::LAST_NAME_REQUIRED,
    length: messages::LAST_NAME_LENGTH,
};

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn check_name(value: Option<&str>, rule: &NameRule, presence: Presence) -> Option<ValidationError> {
    let value = match value {
        None if presence == Presence::Required => return Some(field_error("required", rule.required)),
        None => return None,
        Some(v) => v,
    };

    if presence == Presence::Required && value.trim().is_empty() {
        return Some(field_error("required", rule.required));
    }

    let length = value.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Some(field_error("length", rule.length));
    }

    if !is_valid_name(value) {
        return Some(field_error("pattern", messages::NAME_PATTERN));
    }

    None
}

fn check_age(age: Option<i32>, presence: Presence) -> Option<ValidationError> {
    match age {
        None if presence == Presence::Required => Some(field_error("required", messages::AGE_REQUIRED)),
        None => None,
        Some(age) if age < MIN_AGE => Some(field_error("range", messages::AGE_MIN)),
        Some(age) if age > MAX_AGE => Some(field_error("range", messages::AGE_MAX)),
        Some(_) => None,
    }
}

fn check_birth_date(
    birth_date: Option<NaiveDate>,
    presence: Presence,
    today: NaiveDate,
) -> Option<ValidationError> {
    match birth_date {
        None if presence == Presence::Required => {
            Some(field_error("required", messages::BIRTH_DATE_REQUIRED))
        }
        None => None,
        Some(date) if date >= today => Some(field_error("past", messages::BIRTH_DATE_PAST)),
        Some(_) => None,
    }
}

fn validate_fields(
    first_name: Option<&str>,
    last_name: Option<&str>,
    age: Option<i32>,
    birth_date: Option<NaiveDate>,
    presence: Presence,
) -> Result<(), ValidationErrors> {
    let today = today_utc();
    let mut errors = ValidationErrors::new();

    if let Some(error) = check_name(first_name, &FIRST_NAME_RULE, presence) {
        errors.add(fields::FIRST_NAME, error);
    }
    if let Some(error) = check_name(last_name, &LAST_NAME_RULE, presence) {
        errors.add(fields::LAST_NAME, error);
    }
    if let Some(error) = check_age(age, presence) {
        errors.add(fields::AGE, error);
    }
    if let Some(error) = check_birth_date(birth_date, presence, today) {
        errors.add(fields::BIRTH_DATE, error);
    }

    // Object-level rule only runs on an otherwise well-formed request
    if errors.is_empty() && !AgeBirthDateInvariant::check_on(age, birth_date, today) {
        errors.add(
            OBJECT_LEVEL_KEY,
            field_error("age_matches_birth_date", messages::AGE_MISMATCH),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl Validate for CreateCustomerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.age,
            self.birth_date,
            Presence::Required,
        )
    }
}

impl Validate for UpdateCustomerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.age,
            self.birth_date,
            Presence::Optional,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invariant_tolerates_one_year() {
        let today = date(2024, 6, 15);
        let birth = date(1994, 6, 15);

        assert!(AgeBirthDateInvariant::check_on(Some(29), Some(birth), today));
        assert!(AgeBirthDateInvariant::check_on(Some(30), Some(birth), today));
        assert!(AgeBirthDateInvariant::check_on(Some(31), Some(birth), today));
        assert!(!AgeBirthDateInvariant::check_on(Some(28), Some(birth), today));
        assert!(!AgeBirthDateInvariant::check_on(Some(32), Some(birth), today));
    }

    #[test]
    fn test_invariant_day_before_birthday() {
        let today = date(2024, 6, 14);
        let birth = date(1994, 6, 15);

        assert_eq!(AgeBirthDateInvariant::calculated_age(birth, today), 29);
        assert!(AgeBirthDateInvariant::check_on(Some(30), Some(birth), today));
        assert!(!AgeBirthDateInvariant::check_on(Some(31), Some(birth), today));
    }

    #[test]
    fn test_invariant_absent_inputs_are_valid() {
        let today = date(2024, 1, 1);
        assert!(AgeBirthDateInvariant::check_on(None, None, today));
        assert!(AgeBirthDateInvariant::check_on(Some(200), None, today));
        assert!(AgeBirthDateInvariant::check_on(None, Some(date(1900, 1, 1)), today));
    }

    #[test]
    fn test_invariant_extreme_age_does_not_overflow() {
        let today = date(2024, 1, 1);
        assert!(!AgeBirthDateInvariant::check_on(Some(i32::MIN), Some(date(2000, 1, 1)), today));
        assert!(!AgeBirthDateInvariant::check_on(Some(i32::MAX), Some(date(2000, 1, 1)), today));
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("Juan"));
        assert!(is_valid_name("María José"));
        assert!(is_valid_name("Núñez"));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two accented characters are four bytes
        assert!(check_name(Some("Ñá"), &FIRST_NAME_RULE, Presence::Required).is_none());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let error = check_name(Some("1"), &LAST_NAME_RULE, Presence::Required).unwrap();
        assert_eq!(error.code, "length");
    }

    // January 1st, so the whole-year count is exact on any day of the year
    fn years_ago(years: i32) -> NaiveDate {
        date(today_utc().year() - years, 1, 1)
    }

    fn create_errors(request: &CreateCustomerRequest) -> BTreeMap<String, String> {
        request.validate().map_err(|e| error_messages(&e)).err().unwrap_or_default()
    }

    fn update_errors(request: &UpdateCustomerRequest) -> BTreeMap<String, String> {
        request.validate().map_err(|e| error_messages(&e)).err().unwrap_or_default()
    }

    #[test]
    fn test_name_length_bounds() {
        let fifty = "a".repeat(MAX_NAME_LENGTH);
        let fifty_one = "a".repeat(MAX_NAME_LENGTH + 1);

        assert!(check_name(Some(&fifty), &FIRST_NAME_RULE, Presence::Required).is_none());
        assert!(check_name(Some("Al"), &FIRST_NAME_RULE, Presence::Required).is_none());

        let errors = create_errors(&CreateCustomerRequest::new(fifty_one, "Pérez", 30, years_ago(30)));
        assert_eq!(errors.get(fields::FIRST_NAME).map(String::as_str), Some(messages::FIRST_NAME_LENGTH));

        let errors = create_errors(&CreateCustomerRequest::new("Juan", "P", 30, years_ago(30)));
        assert_eq!(errors.get(fields::LAST_NAME).map(String::as_str), Some(messages::LAST_NAME_LENGTH));
    }

    #[test]
    fn test_age_bounds() {
        let errors = create_errors(&CreateCustomerRequest::new("Juan", "Pérez", -1, years_ago(30)));
        assert_eq!(errors.get(fields::AGE).map(String::as_str), Some(messages::AGE_MIN));

        let errors = create_errors(&CreateCustomerRequest::new("Juan", "Pérez", 151, years_ago(30)));
        assert_eq!(errors.get(fields::AGE).map(String::as_str), Some(messages::AGE_MAX));

        assert!(CreateCustomerRequest::new("Matusalén", "Pérez", 150, years_ago(150))
            .validate()
            .is_ok());
        assert!(CreateCustomerRequest::new("Bebé", "Pérez", 0, today_utc() - chrono::Duration::days(1))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_field_error_suppresses_object_level_check() {
        // Age 151 also disagrees with the birth date; only the field error is reported
        let errors = create_errors(&CreateCustomerRequest::new("Juan", "Pérez", 151, years_ago(30)));
        assert!(errors.contains_key(fields::AGE));
        assert!(!errors.contains_key(OBJECT_LEVEL_KEY));
    }

    #[test]
    fn test_update_applies_rules_to_present_fields() {
        assert!(UpdateCustomerRequest::default().validate().is_ok());

        let errors = update_errors(&UpdateCustomerRequest { age: Some(151), ..Default::default() });
        assert_eq!(errors.get(fields::AGE).map(String::as_str), Some(messages::AGE_MAX));
        assert_eq!(errors.len(), 1);

        let errors = update_errors(&UpdateCustomerRequest {
            first_name: Some("R2D2".to_string()),
            ..Default::default()
        });
        assert_eq!(errors.get(fields::FIRST_NAME).map(String::as_str), Some(messages::NAME_PATTERN));

        let errors = update_errors(&UpdateCustomerRequest {
            last_name: Some("a".repeat(MAX_NAME_LENGTH + 1)),
            ..Default::default()
        });
        assert_eq!(errors.get(fields::LAST_NAME).map(String::as_str), Some(messages::LAST_NAME_LENGTH));

        let errors = update_errors(&UpdateCustomerRequest {
            birth_date: Some(today_utc()),
            ..Default::default()
        });
        assert_eq!(errors.get(fields::BIRTH_DATE).map(String::as_str), Some(messages::BIRTH_DATE_PAST));
    }

    #[test]
    fn test_update_mismatched_pair_is_object_level_error() {
        let errors = update_errors(&UpdateCustomerRequest {
            age: Some(40),
            birth_date: Some(years_ago(30)),
            ..Default::default()
        });
        assert_eq!(errors.get(OBJECT_LEVEL_KEY).map(String::as_str), Some(messages::AGE_MISMATCH));
    }

    #[test]
    fn test_error_messages_flattens_first_message() {
        let mut errors = ValidationErrors::new();
        errors.add(fields::AGE, field_error("range", messages::AGE_MAX));
        errors.add(fields::AGE, field_error("range", messages::AGE_MIN));

        let map = error_messages(&errors);
        assert_eq!(map.get("age").map(String::as_str), Some(messages::AGE_MAX));
    }
}
