// --- File: crates/bookwire_n8n/src/validator.rs ---
//! Field validation for booking and cancellation requests.
//!
//! Validation never short-circuits: every failing field contributes one
//! message, in field order, so clients can fix a form in a single round trip.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{BookingInput, CancellationInput};

pub const NAME_REQUIRED: &str = "Name is required and must be a non-empty string";
pub const EMAIL_INVALID: &str = "Valid email is required";
pub const DATE_INVALID: &str = "Date is required and must be in YYYY-MM-DD format";
pub const TIME_INVALID: &str = "Time is required and must be in HH:MM format (24-hour)";
pub const REASON_REQUIRED: &str = "Reason is required and must be a non-empty string";
pub const DATE_IN_PAST: &str = "Appointment date cannot be in the past";

// Patterns are literals; a compile failure surfaces as "no match" and is
// covered by `test_patterns_compile`.
pub(crate) static EMAIL_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
pub(crate) static DATE_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));
pub(crate) static TIME_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$"));

fn matches(pattern: &Result<Regex, regex::Error>, value: &str) -> bool {
    pattern.as_ref().is_ok_and(|re| re.is_match(value))
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn is_non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn is_valid_email(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches(&EMAIL_RE, v))
}

/// Parses `YYYY-MM-DD` into a real calendar date. `2024-02-30` is rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !matches(&DATE_RE, value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn is_valid_time(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches(&TIME_RE, v))
}

fn check_email_date_time(
    email: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
    errors: &mut Vec<String>,
) -> Option<NaiveDate> {
    if !is_valid_email(email) {
        errors.push(EMAIL_INVALID.to_string());
    }
    let parsed = date.and_then(parse_date);
    if parsed.is_none() {
        errors.push(DATE_INVALID.to_string());
    }
    if !is_valid_time(time) {
        errors.push(TIME_INVALID.to_string());
    }
    parsed
}

/// Validates a booking against the local calendar date.
pub fn validate_booking(input: &BookingInput) -> ValidationResult {
    validate_booking_on(input, Local::now().date_naive())
}

/// Validates a booking, treating `today` as the current date.
///
/// A well-formed date strictly before `today` is rejected. Today itself is
/// accepted regardless of the time of day.
pub fn validate_booking_on(input: &BookingInput, today: NaiveDate) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_non_blank(input.name.as_deref()) {
        errors.push(NAME_REQUIRED.to_string());
    }
    let date = check_email_date_time(
        input.email.as_deref(),
        input.date.as_deref(),
        input.time.as_deref(),
        &mut errors,
    );
    if !is_non_blank(input.reason.as_deref()) {
        errors.push(REASON_REQUIRED.to_string());
    }
    if date.is_some_and(|d| d < today) {
        errors.push(DATE_IN_PAST.to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Validates a cancellation. Past dates are allowed.
pub fn validate_cancellation(input: &CancellationInput) -> ValidationResult {
    let mut errors = Vec::new();
    check_email_date_time(
        input.email.as_deref(),
        input.date.as_deref(),
        input.time.as_deref(),
        &mut errors,
    );
    ValidationResult::from_errors(errors)
}
