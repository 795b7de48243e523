//! Derived field evaluation.
//!
//! Derived fields never fail hard: an unparseable source date becomes the
//! `"Invalid Date"` sentinel, a missing or empty source becomes the empty
//! string. For a fixed date, recomputation is idempotent.

use chrono::{Datelike, Local, NaiveDate};

use crate::form::{DerivationFormula, FieldKind, FieldSpec};
use crate::value::{Value, ValueBag};

/// Sentinel shown when a derivation source cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

impl DerivationFormula {
    /// Apply the formula to its source values, relative to `today`.
    pub fn apply(&self, sources: &[Value], today: NaiveDate) -> Value {
        match self {
            DerivationFormula::AgeFromDob => age_from_dob(sources.first(), today),
        }
    }
}

/// Recompute every derived field, reading sources from `values`.
///
/// Uses the current local date; see [`derive_all_at`] for an injectable
/// clock.
pub fn derive_all(fields: &[FieldSpec], values: &ValueBag) -> ValueBag {
    derive_all_at(fields, values, Local::now().date_naive())
}

/// Recompute every derived field relative to a fixed `today`.
///
/// Fields are processed in schema order; sources are read from the bag as it
/// stands, so a derived field must only source non-derived fields (an
/// author-side convention, not enforced here). Returns the updated bag.
pub fn derive_all_at(fields: &[FieldSpec], values: &ValueBag, today: NaiveDate) -> ValueBag {
    let mut out = values.clone();
    for field in fields {
        let FieldKind::Derived(derivation) = &field.kind else {
            continue;
        };
        let sources: Vec<Value> = derivation
            .source_fields
            .iter()
            .map(|id| out.get(id).cloned().unwrap_or(Value::Null))
            .collect();
        out.insert(field.id.clone(), derivation.formula.apply(&sources, today));
    }
    out
}

fn age_from_dob(source: Option<&Value>, today: NaiveDate) -> Value {
    let Some(raw) = source else {
        return Value::text("");
    };
    if raw.is_empty() {
        return Value::text("");
    }
    match parse_date(&raw.display_string()) {
        Some(dob) => Value::Number(completed_years(dob, today) as f64),
        None => Value::text(INVALID_DATE),
    }
}

/// Parse a calendar date from the string forms date inputs produce.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.date_naive())
                .ok()
        })
}

/// Whole years elapsed between `dob` and `today`.
///
/// A birthday not yet reached this year counts one less.
fn completed_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}
