//! Field and form validation.
//!
//! Validation is a results protocol, not a failure path: a rule violation is
//! reported as a human-readable message, never as an error value or a panic.
//! Rules run in a fixed order and the first failing rule wins.

use std::collections::BTreeMap;

use crate::form::{FieldKind, FieldSpec, FormSchema, TextRules};
use crate::value::{Value, ValueBag};

use super::patterns;

/// Validate a single field's value against its declared rules.
///
/// Rule order, first failure wins:
///
/// 1. Derived fields are always valid.
/// 2. Required: the value must not be empty.
/// 3. Text-like kinds only: minimum length, then maximum length, then email
///    shape, then password rules.
///
/// Returns the violation message, or `None` if every rule passes. Total for
/// any input value: non-string values are coerced to their string form
/// before length and pattern checks.
pub fn validate_field(field: &FieldSpec, value: &Value) -> Option<String> {
    if field.kind.is_derived() {
        return None;
    }

    if field.required && value.is_empty() {
        return Some(format!("{} is required.", field.label));
    }

    match &field.kind {
        FieldKind::Text(rules) | FieldKind::Textarea(rules) => {
            check_text_rules(&field.label, rules, &value.display_string())
        }
        _ => None,
    }
}

/// Apply the text rules to an already-coerced string value.
fn check_text_rules(label: &str, rules: &TextRules, text: &str) -> Option<String> {
    let length = text.chars().count();

    if let Some(min) = rules.min_length {
        if length < min as usize {
            return Some(format!("{} must be at least {} characters.", label, min));
        }
    }

    if let Some(max) = rules.max_length {
        if length > max as usize {
            return Some(format!("{} must be no more than {} characters.", label, max));
        }
    }

    if rules.email && !text.is_empty() && !patterns::is_email(text) {
        return Some("Please enter a valid email address.".to_string());
    }

    if rules.password && !text.is_empty() {
        if length < 8 {
            return Some("Password must be at least 8 characters long.".to_string());
        }
        if !patterns::has_digit(text) {
            return Some("Password must contain at least one number.".to_string());
        }
    }

    None
}

/// Validate every field of a schema against the current values.
///
/// Returns a map from field id to violation message, containing only the
/// failing fields. An empty map means the form is valid.
pub fn validate_form(schema: &FormSchema, values: &ValueBag) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for field in &schema.fields {
        let value = values.get(&field.id).unwrap_or(&Value::Null);
        if let Some(message) = validate_field(field, value) {
            errors.insert(field.id.clone(), message);
        }
    }
    errors
}
