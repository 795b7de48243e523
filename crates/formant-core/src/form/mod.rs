//! Form schema parsing, validation and assembly.
//!
//! Form schemas are structured data validated against JSON Schema.
//! This module handles parsing YAML/JSON schema documents, checking their
//! structural invariants and editing drafts.

mod builder;
mod parser;
mod schema;

pub use builder::MoveDirection;
pub use parser::{
    ChoiceOptions, Derivation, DerivationFormula, FieldKind, FieldSpec, FormSchema, SchemaError,
    TextRules,
};
pub use schema::{is_valid_form_document, validate_form_document};
