//! A form-filling session: one schema, one value bag, one error map.
//!
//! The session owns the control flow the engine itself stays out of: every
//! value change re-runs derivation and revalidates the changed field, and
//! submission validates the whole form before accepting.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::engine::{derive_all_at, validate_field, validate_form};
use crate::form::FormSchema;
use crate::value::{Value, ValueBag};

/// Live state of one filling session.
///
/// Values are seeded from the schema's defaults when the session opens, then
/// mutated one field at a time. Derived fields are refreshed after every
/// change; error state follows the field being edited and is replaced
/// wholesale on submission.
#[derive(Debug, Clone)]
pub struct FillSession {
    schema: FormSchema,
    today: NaiveDate,
    values: ValueBag,
    errors: BTreeMap<String, String>,
}

impl FillSession {
    /// Open a session against the current local date.
    pub fn new(schema: FormSchema) -> Self {
        Self::at(schema, Local::now().date_naive())
    }

    /// Open a session with a fixed "today", for deterministic derivation.
    pub fn at(schema: FormSchema, today: NaiveDate) -> Self {
        let seeded = ValueBag::seeded(&schema);
        let values = derive_all_at(&schema.fields, &seeded, today);
        Self {
            schema,
            today,
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &ValueBag {
        &self.values
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    /// Current per-field errors. Only failing fields appear.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    /// Record a new value for a field, refresh derived fields and update the
    /// field's error state. A value for an id the schema does not know is
    /// dropped.
    pub fn set_value(&mut self, id: &str, value: Value) {
        let Some(field) = self.schema.field(id) else {
            debug!(field = id, "ignoring value for unknown field");
            return;
        };

        match validate_field(field, &value) {
            Some(message) => {
                self.errors.insert(id.to_string(), message);
            }
            None => {
                self.errors.remove(id);
            }
        }

        self.values.insert(id.to_string(), value);
        self.values = derive_all_at(&self.schema.fields, &self.values, self.today);
    }

    /// Whether the last validation pass left no errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validate the whole form.
    ///
    /// On success the final values are returned; on failure the aggregated
    /// per-field errors. Either way the session's error state is replaced
    /// with the result of this pass.
    pub fn submit(&mut self) -> Result<&ValueBag, &BTreeMap<String, String>> {
        self.values = derive_all_at(&self.schema.fields, &self.values, self.today);
        self.errors = validate_form(&self.schema, &self.values);
        if self.errors.is_empty() {
            debug!(schema = %self.schema.id, "form accepted");
            Ok(&self.values)
        } else {
            debug!(
                schema = %self.schema.id,
                errors = self.errors.len(),
                "form rejected"
            );
            Err(&self.errors)
        }
    }
}
