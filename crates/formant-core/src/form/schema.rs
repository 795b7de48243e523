//! JSON Schema validation for schema documents.
//!
//! Hand-written form documents are validated against spec/form.schema.json
//! before they are trusted. This module provides schema loading and
//! validation utilities.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded form document schema (loaded at compile time).
const FORM_SCHEMA_JSON: &str = include_str!("../../../../spec/form.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from document schema validation.
#[derive(Error, Debug)]
pub enum DocumentSchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

/// Get or initialize the compiled schema validator.
fn get_validator() -> Result<&'static jsonschema::Validator, DocumentSchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(FORM_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(DocumentSchemaError::LoadError(e.clone())),
    }
}

/// Validate a form document JSON value against the schema.
///
/// # Arguments
///
/// * `document` - The form document as a JSON value
///
/// # Returns
///
/// * `Ok(())` - Document is valid
/// * `Err(Vec<String>)` - List of validation errors
pub fn validate_form_document(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check if a form document JSON value is valid against the schema.
///
/// Returns true if valid, false otherwise. Use `validate_form_document`
/// for detailed error messages.
pub fn is_valid_form_document(document: &serde_json::Value) -> bool {
    get_validator()
        .map(|v| v.is_valid(document))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document_passes_schema() {
        let value = serde_json::json!({
            "id": "signup",
            "name": "Signup Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "name", "label": "Name", "type": "text", "required": true, "min_length": 2 },
                { "id": "dob", "label": "Date of Birth", "type": "date" },
                {
                    "id": "age",
                    "label": "Age",
                    "type": "derived",
                    "formula": "age_from_dob",
                    "source_fields": ["dob"]
                }
            ]
        });
        assert!(validate_form_document(&value).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let value = serde_json::json!({
            "id": "signup",
            "name": "Signup Form"
            // Missing: created_at, fields
        });
        let result = validate_form_document(&value);
        assert!(result.is_err());
        let errors = result.unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_unknown_kind_fails() {
        let value = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "a", "label": "A", "type": "slider" }
            ]
        });
        assert!(validate_form_document(&value).is_err());
    }

    #[test]
    fn test_length_rule_on_checkbox_fails() {
        let value = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "a", "label": "A", "type": "checkbox", "min_length": 2 }
            ]
        });
        assert!(validate_form_document(&value).is_err());
    }

    #[test]
    fn test_select_requires_options() {
        let missing = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "a", "label": "A", "type": "select" }
            ]
        });
        assert!(validate_form_document(&missing).is_err());

        let empty = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "a", "label": "A", "type": "select", "options": [] }
            ]
        });
        assert!(validate_form_document(&empty).is_err());
    }

    #[test]
    fn test_derived_requires_formula() {
        let value = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "age", "label": "Age", "type": "derived" }
            ]
        });
        assert!(validate_form_document(&value).is_err());
    }

    #[test]
    fn test_additional_properties_fail() {
        let value = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": [],
            "unknown_field": "should fail"
        });
        assert!(validate_form_document(&value).is_err());
    }

    #[test]
    fn test_is_valid_helper() {
        let valid = serde_json::json!({
            "id": "f",
            "name": "Form",
            "created_at": "2024-01-01T00:00:00Z",
            "fields": []
        });
        assert!(is_valid_form_document(&valid));

        let invalid = serde_json::json!({ "name": "Only name" });
        assert!(!is_valid_form_document(&invalid));
    }
}
