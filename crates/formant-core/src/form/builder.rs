//! Schema assembly: creating drafts and editing their field list.
//!
//! A schema is built as a draft: fields are appended, reordered and removed
//! freely until the draft is persisted. After that the schema is treated as
//! immutable; re-saving under the same id overwrites it wholesale.

use chrono::Utc;
use uuid::Uuid;

use super::parser::{FieldKind, FieldSpec, FormSchema};

/// Direction for [`FormSchema::move_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl FieldSpec {
    /// Create a field of the given kind with a generated id and a
    /// placeholder label.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            id: format!("field_{}", Uuid::new_v4().simple()),
            label: format!("New {} field", kind.display_name()),
            required: false,
            default_value: None,
            kind,
        }
    }
}

impl FormSchema {
    /// Create an unsaved draft schema with a generated id and no fields.
    pub fn draft(name: impl Into<String>) -> Self {
        Self {
            id: format!("form_{}", Uuid::new_v4().simple()),
            name: name.into(),
            created_at: Utc::now(),
            fields: Vec::new(),
        }
    }

    /// Append a new field of the given kind and return its id.
    pub fn add_field(&mut self, kind: FieldKind) -> String {
        let field = FieldSpec::new(kind);
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Look up a field by id for editing.
    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldSpec> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Remove a field by id. Returns whether a field was removed.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        self.fields.len() != before
    }

    /// Swap a field with its neighbor. A move past either end is a no-op.
    pub fn move_field(&mut self, id: &str, direction: MoveDirection) -> bool {
        let Some(index) = self.fields.iter().position(|f| f.id == id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.fields.len() => index + 1,
            _ => return false,
        };
        self.fields.swap(index, target);
        true
    }

    /// Date fields of this schema, the candidate sources for derivation.
    pub fn date_fields(&self) -> Vec<&FieldSpec> {
        self.fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Date))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ChoiceOptions, Derivation, TextRules};

    #[test]
    fn test_draft_and_add_fields() {
        let mut schema = FormSchema::draft("Survey");
        let a = schema.add_field(FieldKind::Text(TextRules::default()));
        let b = schema.add_field(FieldKind::Date);

        assert_ne!(a, b);
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].label, "New text field");
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_default_choice_options_are_seeded() {
        let mut schema = FormSchema::draft("Survey");
        schema.add_field(FieldKind::Select(ChoiceOptions::default()));

        match &schema.fields[0].kind {
            FieldKind::Select(choices) => {
                assert_eq!(choices.options, vec!["Option 1", "Option 2"])
            }
            other => panic!("expected select, got {:?}", other),
        }
    }

    #[test]
    fn test_move_field() {
        let mut schema = FormSchema::draft("Survey");
        let a = schema.add_field(FieldKind::Text(TextRules::default()));
        let b = schema.add_field(FieldKind::Number);

        assert!(schema.move_field(&b, MoveDirection::Up));
        assert_eq!(schema.fields[0].id, b);

        // Already at the top; nothing moves.
        assert!(!schema.move_field(&b, MoveDirection::Up));
        assert_eq!(schema.fields[0].id, b);
        assert_eq!(schema.fields[1].id, a);
    }

    #[test]
    fn test_remove_field() {
        let mut schema = FormSchema::draft("Survey");
        let a = schema.add_field(FieldKind::Checkbox);

        assert!(schema.remove_field(&a));
        assert!(!schema.remove_field(&a));
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn test_date_fields_lists_derivation_sources() {
        let mut schema = FormSchema::draft("Survey");
        schema.add_field(FieldKind::Text(TextRules::default()));
        let dob = schema.add_field(FieldKind::Date);
        schema.add_field(FieldKind::Derived(Derivation::default()));

        let dates = schema.date_fields();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].id, dob);
    }
}
