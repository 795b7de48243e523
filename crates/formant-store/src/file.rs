//! JSON-file-backed schema store.
//!
//! All schemas live in one JSON document: an array of serialized
//! [`FormSchema`] values. Every mutation rewrites the whole document; the
//! store is small and the format stays trivially inspectable.

use std::fs;
use std::path::{Path, PathBuf};

use formant_core::FormSchema;
use tracing::debug;

use crate::store::{upsert_in_place, SchemaStore, StoreError};

/// Schema store persisting to a single JSON file.
///
/// A missing file reads as an empty store; the file is created on the first
/// write, including any missing parent directories.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<FormSchema>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let schemas: Vec<FormSchema> = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = schemas.len(), "loaded schema store");
        Ok(schemas)
    }

    fn write_all(&self, schemas: &[FormSchema]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(schemas)?;
        fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), count = schemas.len(), "wrote schema store");
        Ok(())
    }
}

impl SchemaStore for JsonFileStore {
    fn list(&self) -> Result<Vec<FormSchema>, StoreError> {
        self.read_all()
    }

    fn get_by_id(&self, id: &str) -> Result<Option<FormSchema>, StoreError> {
        Ok(self.read_all()?.into_iter().find(|s| s.id == id))
    }

    fn upsert(&self, schema: FormSchema) -> Result<(), StoreError> {
        schema.validate()?;
        let mut schemas = self.read_all()?;
        upsert_in_place(&mut schemas, schema);
        self.write_all(&schemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formant_core::{FieldKind, TextRules};

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("forms.json"))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().unwrap().is_empty());
        assert!(store.get_by_id("nope").unwrap().is_none());
    }

    #[test]
    fn test_round_trips_structurally_equal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut schema = FormSchema::draft("Signup");
        schema.add_field(FieldKind::Text(TextRules {
            min_length: Some(2),
            email: true,
            ..TextRules::default()
        }));
        schema.add_field(FieldKind::Date);

        store.upsert(schema.clone()).unwrap();
        let loaded = store.get_by_id(&schema.id).unwrap().unwrap();
        assert_eq!(schema, loaded);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let first = FormSchema::draft("First");
        let second = FormSchema::draft("Second");
        store.upsert(first.clone()).unwrap();
        store.upsert(second.clone()).unwrap();

        let mut renamed = first.clone();
        renamed.name = "Renamed".to_string();
        store.upsert(renamed).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        // Replacement keeps the original position.
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[0].name, "Renamed");
        assert_eq!(listed[1].id, second.id);
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut schema = FormSchema::draft("Broken");
        schema.name = "  ".to_string();

        assert!(matches!(
            store.upsert(schema),
            Err(StoreError::InvalidSchema(_))
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep/forms.json"));
        store.upsert(FormSchema::draft("Survey")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
