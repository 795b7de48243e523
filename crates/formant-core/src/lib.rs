//! # formant-core
//!
//! Form schema model and deterministic validation/derivation engine.
//!
//! This crate provides the core logic for Formant: a typed schema for
//! dynamic forms, and the pure evaluation engine that keeps a filling
//! session's derived values fresh and its input validated.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same schema, values and date always produce the
//!    same result
//! 2. **Total**: validation and derivation never panic or return errors;
//!    failures are data (messages, sentinels)
//! 3. **Storage-free**: this crate never touches persistence; stores are a
//!    separate collaborator
//! 4. **Unrepresentable misconfiguration**: rules live on the field kinds
//!    they apply to, so a checkbox cannot carry a length rule
//!
//! ## Example
//!
//! ```rust,ignore
//! use formant_core::{FillSession, FormSchema, Value};
//!
//! let schema = FormSchema::from_yaml_file("signup.yaml")?;
//! let mut session = FillSession::new(schema);
//!
//! session.set_value("dob", Value::text("2000-06-15"));
//! match session.submit() {
//!     Ok(values) => println!("accepted: {} values", values.len()),
//!     Err(errors) => {
//!         for (field, message) in errors {
//!             println!("{}: {}", field, message);
//!         }
//!     }
//! }
//! ```

pub mod engine;
pub mod form;
pub mod session;
pub mod value;

// Re-export main types at crate root
pub use engine::{derive_all, derive_all_at, validate_field, validate_form, INVALID_DATE};
pub use form::{
    is_valid_form_document, validate_form_document, ChoiceOptions, Derivation, DerivationFormula,
    FieldKind, FieldSpec, FormSchema, MoveDirection, SchemaError, TextRules,
};
pub use session::FillSession;
pub use value::{Value, ValueBag};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_build_fill_submit() {
        let mut schema = FormSchema::draft("Signup");
        let name = schema.add_field(FieldKind::Text(TextRules {
            min_length: Some(2),
            ..TextRules::default()
        }));
        let dob = schema.add_field(FieldKind::Date);
        let age = schema.add_field(FieldKind::Derived(Derivation {
            formula: DerivationFormula::AgeFromDob,
            source_fields: vec![dob.clone()],
        }));

        if let Some(field) = schema.field_mut(&name) {
            field.label = "Full Name".to_string();
            field.required = true;
        }
        schema.validate().unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        let mut session = FillSession::at(schema, today);

        session.set_value(&name, Value::text("Ada Lovelace"));
        session.set_value(&dob, Value::text("2000-06-15"));

        let values = session.submit().expect("form should be valid");
        assert_eq!(values.get(&age), Some(&Value::Number(24.0)));
    }

    #[test]
    fn test_schema_documents_round_trip_through_the_engine() {
        let schema = FormSchema::from_yaml(
            r#"
id: "contact"
name: "Contact"
created_at: "2024-01-01T00:00:00Z"
fields:
  - id: "email"
    label: "Email"
    type: "text"
    required: true
    email: true
"#,
        )
        .unwrap();

        let document = serde_json::to_value(&schema).unwrap();
        assert!(is_valid_form_document(&document));

        let mut values = ValueBag::seeded(&schema);
        values.insert("email".to_string(), Value::text("not-an-email"));
        let errors = validate_form(&schema, &values);
        assert_eq!(
            errors.get("email").map(String::as_str),
            Some("Please enter a valid email address.")
        );
    }
}
