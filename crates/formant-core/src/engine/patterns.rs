//! Shared detection patterns for validation rules.
//!
//! These patterns are compiled once and reused by every rule check.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Basic email shape: non-space local part, `@`, non-space domain
    /// containing a dot. Deliberately loose; this is a form-level sanity
    /// check, not RFC 5322 enforcement.
    pub static ref EMAIL_PATTERN: Regex = Regex::new(
        r"\S+@\S+\.\S+"
    ).unwrap();

    /// Any decimal digit.
    pub static ref DIGIT_PATTERN: Regex = Regex::new(
        r"\d"
    ).unwrap();
}

/// Check if a value looks like an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Check if a value contains at least one digit.
pub fn has_digit(value: &str) -> bool {
    DIGIT_PATTERN.is_match(value)
}
