//! Form schema parsing from YAML/JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::value::Value;

/// Errors that can occur when parsing schema documents.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate field id: {0}")]
    DuplicateFieldId(String),

    #[error("Field '{field}' must declare at least one option")]
    EmptyOptions { field: String },

    #[error("Derived field '{field}' references unknown source field '{src}'")]
    UnknownSourceField { field: String, src: String },

    #[error("Derived field '{field}' takes {expected} source field(s), found {found}")]
    SourceArity {
        field: String,
        expected: usize,
        found: usize,
    },
}

/// Length and shape rules for text-like fields.
///
/// These rules only exist on the kinds they apply to; a checkbox or date
/// field cannot carry a `min_length` at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRules {
    /// Minimum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,

    /// Maximum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Value must look like an email address
    #[serde(default, skip_serializing_if = "is_false")]
    pub email: bool,

    /// Value must satisfy the password rules (length, digit)
    #[serde(default, skip_serializing_if = "is_false")]
    pub password: bool,
}

/// Option list for select/radio fields. Order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOptions {
    pub options: Vec<String>,
}

impl Default for ChoiceOptions {
    /// Placeholder options a builder starts from.
    fn default() -> Self {
        Self {
            options: vec!["Option 1".to_string(), "Option 2".to_string()],
        }
    }
}

/// The closed set of derivation formulas.
///
/// Each formula is a pure function over its source field values. The set is
/// deliberately closed: no dynamic registration, no plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationFormula {
    /// Age in completed years, computed from a date-of-birth field.
    AgeFromDob,
}

impl DerivationFormula {
    /// Number of source fields the formula reads.
    pub fn arity(&self) -> usize {
        match self {
            DerivationFormula::AgeFromDob => 1,
        }
    }
}

/// Configuration of a derived field: which formula, fed by which fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub formula: DerivationFormula,

    /// Ids of the fields the formula reads, in formula argument order.
    #[serde(default)]
    pub source_fields: Vec<String>,
}

impl Default for Derivation {
    fn default() -> Self {
        Self {
            formula: DerivationFormula::AgeFromDob,
            source_fields: Vec::new(),
        }
    }
}

/// A field's kind, carrying only the configuration meaningful to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text(TextRules),
    Number,
    Textarea(TextRules),
    Select(ChoiceOptions),
    Radio(ChoiceOptions),
    Checkbox,
    Date,
    Derived(Derivation),
}

impl FieldKind {
    /// The kind's name as it appears in schema documents.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Text(_) => "text",
            FieldKind::Number => "number",
            FieldKind::Textarea(_) => "textarea",
            FieldKind::Select(_) => "select",
            FieldKind::Radio(_) => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Derived(_) => "derived",
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, FieldKind::Derived(_))
    }
}

/// One form field: identity, presentation and rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique within the schema, assigned at creation, immutable thereafter
    pub id: String,

    /// Display label, also used in validation messages
    pub label: String,

    /// Whether a value must be present on submission
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Initial value when a filling session opens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(flatten)]
    pub kind: FieldKind,
}

/// A named, ordered collection of fields plus metadata.
///
/// Field order is meaningful: it is both display order and the implicit
/// dependency order for derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Unique schema id, immutable once assigned
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Set once when the schema is created
    pub created_at: DateTime<Utc>,

    /// Ordered field list
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: FormSchema = serde_yaml::from_str(yaml)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parse a schema from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: FormSchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parse a schema from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a schema from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Look up a field by id.
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Validate the schema structure.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::MissingField("name".to_string()));
        }

        if self.id.trim().is_empty() {
            return Err(SchemaError::MissingField("id".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.id.trim().is_empty() {
                return Err(SchemaError::MissingField(format!("fields[{}].id", index)));
            }
            if !seen.insert(&field.id) {
                return Err(SchemaError::DuplicateFieldId(field.id.clone()));
            }
        }

        for field in &self.fields {
            match &field.kind {
                FieldKind::Select(choices) | FieldKind::Radio(choices) => {
                    if choices.options.is_empty() {
                        return Err(SchemaError::EmptyOptions {
                            field: field.id.clone(),
                        });
                    }
                }
                FieldKind::Derived(derivation) => {
                    let expected = derivation.formula.arity();
                    if derivation.source_fields.len() != expected {
                        return Err(SchemaError::SourceArity {
                            field: field.id.clone(),
                            expected,
                            found: derivation.source_fields.len(),
                        });
                    }
                    for source in &derivation.source_fields {
                        if self.field(source).is_none() {
                            return Err(SchemaError::UnknownSourceField {
                                field: field.id.clone(),
                                src: source.clone(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
