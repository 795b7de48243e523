//! The schema store contract.

use formant_core::{FormSchema, SchemaError};
use thiserror::Error;

/// Errors from schema stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to decode store contents: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Refusing to store invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// A place saved form schemas live.
///
/// Implementations persist whole [`FormSchema`] values and round-trip them
/// structurally equal. `upsert` replaces an existing schema with the same id
/// or appends a new one; `list` preserves first-insertion order.
pub trait SchemaStore {
    /// All saved schemas, in first-insertion order.
    fn list(&self) -> Result<Vec<FormSchema>, StoreError>;

    /// One schema by id, if present.
    fn get_by_id(&self, id: &str) -> Result<Option<FormSchema>, StoreError>;

    /// Insert or replace a schema by id.
    ///
    /// The schema is structurally validated before it is written.
    fn upsert(&self, schema: FormSchema) -> Result<(), StoreError>;
}

/// Replace-or-append by id, preserving order. Shared by the backends.
pub(crate) fn upsert_in_place(schemas: &mut Vec<FormSchema>, schema: FormSchema) {
    match schemas.iter_mut().find(|s| s.id == schema.id) {
        Some(existing) => *existing = schema,
        None => schemas.push(schema),
    }
}
