//! In-memory schema store for tests and embedding.

use std::sync::Mutex;

use formant_core::FormSchema;

use crate::store::{upsert_in_place, SchemaStore, StoreError};

/// Schema store holding everything in memory.
#[derive(Default)]
pub struct MemoryStore {
    schemas: Mutex<Vec<FormSchema>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaStore for MemoryStore {
    fn list(&self) -> Result<Vec<FormSchema>, StoreError> {
        let schemas = self.schemas.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(schemas.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<FormSchema>, StoreError> {
        let schemas = self.schemas.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(schemas.iter().find(|s| s.id == id).cloned())
    }

    fn upsert(&self, schema: FormSchema) -> Result<(), StoreError> {
        schema.validate()?;
        let mut schemas = self.schemas.lock().map_err(|_| StoreError::Poisoned)?;
        upsert_in_place(&mut schemas, schema);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_lookup() {
        let store = MemoryStore::new();
        let schema = FormSchema::draft("Survey");
        store.upsert(schema.clone()).unwrap();

        assert_eq!(store.get_by_id(&schema.id).unwrap(), Some(schema));
        assert!(store.get_by_id("other").unwrap().is_none());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        let a = FormSchema::draft("A");
        let b = FormSchema::draft("B");
        store.upsert(a.clone()).unwrap();
        store.upsert(b.clone()).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
