// 📐 Shape Layer - Record schemas
// A Record is a typed shape described by a field table.
// Schema checks run before any row is coerced.

use std::collections::{HashMap, HashSet};

use crate::attributes::{FieldSpec, FieldType, FieldValue};
use crate::error::RecordError;

// ============================================================================
// RECORD TRAIT
// ============================================================================

pub trait Record: Sized {
    /// Display name used in errors and logs
    const KIND: &'static str;

    /// Field table, in declaration order
    const FIELDS: &'static [FieldSpec];

    fn from_row(row: &Row) -> Result<Self, RecordError>;
}

// ============================================================================
// ROW
// ============================================================================

/// One coerced input line.
#[derive(Debug, Clone, Default)]
pub struct Row {
    kind: &'static str,
    values: HashMap<&'static str, FieldValue>,
}

impl Row {
    pub fn new(kind: &'static str) -> Self {
        Row {
            kind,
            values: HashMap::new(),
        }
    }

    pub fn insert(&mut self, field: &'static str, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    fn missing(&self, field: &str, expected: &str) -> RecordError {
        RecordError::schema(self.kind, format!("no {expected} value for field '{field}'"))
    }

    pub fn integer(&self, field: &str) -> Result<i64, RecordError> {
        self.get(field)
            .and_then(FieldValue::as_integer)
            .ok_or_else(|| self.missing(field, "integer"))
    }

    pub fn float(&self, field: &str) -> Result<f64, RecordError> {
        self.get(field)
            .and_then(FieldValue::as_float)
            .ok_or_else(|| self.missing(field, "float"))
    }

    pub fn boolean(&self, field: &str) -> Result<bool, RecordError> {
        self.get(field)
            .and_then(FieldValue::as_bool)
            .ok_or_else(|| self.missing(field, "boolean"))
    }

    pub fn text(&self, field: &str) -> Result<String, RecordError> {
        self.get(field)
            .and_then(FieldValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| self.missing(field, "text"))
    }

    pub fn code(&self, field: &str) -> Result<i64, RecordError> {
        self.get(field)
            .and_then(FieldValue::as_code)
            .ok_or_else(|| self.missing(field, "enumeration"))
    }

    pub fn integer_or(&self, field: &str, default: i64) -> i64 {
        self.get(field).and_then(FieldValue::as_integer).unwrap_or(default)
    }

    pub fn text_or(&self, field: &str, default: &str) -> String {
        self.get(field)
            .and_then(FieldValue::as_text)
            .unwrap_or(default)
            .to_string()
    }
}

// ============================================================================
// SCHEMA VALIDATION
// ============================================================================

/// Check that a record's field table describes a usable shape
pub fn validate_schema<T: Record>() -> Result<(), RecordError> {
    if T::FIELDS.is_empty() {
        return Err(RecordError::schema(
            T::KIND,
            "not a structured record type (no fields declared)",
        ));
    }

    let mut seen = HashSet::new();
    for spec in T::FIELDS {
        if !seen.insert(spec.name) {
            return Err(RecordError::schema(
                T::KIND,
                format!("field '{}' is declared twice", spec.name),
            ));
        }
    }

    Ok(())
}

/// Keyed loading needs an integer `id` field
pub fn require_id<T: Record>() -> Result<(), RecordError> {
    match T::FIELDS.iter().find(|spec| spec.name == "id") {
        Some(spec) if spec.field_type == FieldType::Integer && spec.required => Ok(()),
        Some(_) => Err(RecordError::schema(
            T::KIND,
            "field 'id' must be a required integer for keyed loading",
        )),
        None => Err(RecordError::schema(
            T::KIND,
            "keyed loading requires an 'id' field",
        )),
    }
}

/// Every required field must be a column. Extra columns are ignored.
pub fn validate_header<T: Record>(headers: &[String]) -> Result<(), RecordError> {
    let missing: Vec<&str> = T::FIELDS
        .iter()
        .filter(|spec| spec.required)
        .filter(|spec| !headers.iter().any(|h| h == spec.name))
        .map(|spec| spec.name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RecordError::schema(
            T::KIND,
            format!("missing required column(s): {}", missing.join(", ")),
        ))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Tag {
        label: String,
    }

    impl Record for Tag {
        const KIND: &'static str = "Tag";
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("label", FieldType::Text)];

        fn from_row(row: &Row) -> Result<Self, RecordError> {
            Ok(Tag {
                label: row.text("label")?,
            })
        }
    }

    struct Shapeless;

    impl Record for Shapeless {
        const KIND: &'static str = "Shapeless";
        const FIELDS: &'static [FieldSpec] = &[];

        fn from_row(_row: &Row) -> Result<Self, RecordError> {
            Ok(Shapeless)
        }
    }

    struct Twice;

    impl Record for Twice {
        const KIND: &'static str = "Twice";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("id", FieldType::Integer),
            FieldSpec::optional("id", FieldType::Text),
        ];

        fn from_row(_row: &Row) -> Result<Self, RecordError> {
            Ok(Twice)
        }
    }

    struct TextId;

    impl Record for TextId {
        const KIND: &'static str = "TextId";
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("id", FieldType::Text)];

        fn from_row(_row: &Row) -> Result<Self, RecordError> {
            Ok(TextId)
        }
    }

    #[test]
    fn test_validate_schema() {
        assert!(validate_schema::<Tag>().is_ok());
        assert!(matches!(
            validate_schema::<Shapeless>(),
            Err(RecordError::Schema { .. })
        ));
        assert!(validate_schema::<Twice>().is_err());
    }

    #[test]
    fn test_require_id() {
        let err = require_id::<Tag>().unwrap_err();
        assert!(err.to_string().contains("requires an 'id' field"));

        assert!(require_id::<TextId>().is_err());
        assert!(require_id::<Twice>().is_ok());
    }

    #[test]
    fn test_validate_header() {
        let headers = vec!["label".to_string(), "color".to_string()];
        assert!(validate_header::<Tag>(&headers).is_ok());

        let err = validate_header::<Tag>(&["color".to_string()]).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_row_getters() {
        let mut row = Row::new("Tag");
        row.insert("label", FieldValue::Text("urgent".to_string()));
        row.insert("count", FieldValue::Integer(3));

        assert_eq!(row.text("label").unwrap(), "urgent");
        assert_eq!(row.integer("count").unwrap(), 3);
        assert!(row.integer("label").is_err());
        assert!(row.boolean("missing").is_err());
        assert_eq!(row.integer_or("missing", 0), 0);
        assert_eq!(row.text_or("missing", "Unknown"), "Unknown");
        assert_eq!(Tag::from_row(&row).unwrap().label, "urgent");
    }
}
