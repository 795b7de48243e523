//! Dynamically typed field values and the per-session value bag.
//!
//! A filling session owns exactly one [`ValueBag`]: a mapping from field id to
//! the field's current value. The bag is ephemeral and is reconstructed from
//! the schema's defaults each time a form is opened.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::{FieldKind, FormSchema};

/// A single field's runtime value.
///
/// Form input is dynamically typed: text inputs produce strings, number and
/// derived fields produce numbers, checkboxes produce booleans. `Many` is
/// reserved for multi-valued kinds; no current kind produces one, but the
/// emptiness rules treat an empty sequence as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Many(Vec<String>),
}

impl Value {
    /// Convenience constructor for text values.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Whether this value counts as empty for the required-field rule.
    ///
    /// Empty means: absent, a string that is empty or whitespace-only, or an
    /// empty sequence. Booleans and numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Many(items) => items.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Coerce to the string form used by length and pattern checks.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Many(items) => items.join(","),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Render a number without a trailing `.0` for whole values.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// The live values of one form-filling session, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBag(BTreeMap<String, Value>);

impl ValueBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a bag from a schema's defaults.
    ///
    /// Checkboxes default to `false`, everything else to the empty string,
    /// unless the field declares its own default value.
    pub fn seeded(schema: &FormSchema) -> Self {
        let mut bag = Self::new();
        for field in &schema.fields {
            let value = match (&field.kind, &field.default_value) {
                (_, Some(default)) => default.clone(),
                (FieldKind::Checkbox, None) => Value::Bool(false),
                (_, None) => Value::text(""),
            };
            bag.insert(field.id.clone(), value);
        }
        bag
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    pub fn insert(&mut self, id: String, value: Value) {
        self.0.insert(id, value);
    }

    /// Copy every entry of `other` into this bag, overwriting on collision.
    pub fn merge(&mut self, other: ValueBag) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for ValueBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
