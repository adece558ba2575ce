// 🏛️ Field Descriptors
// Each record shape is described by a static table of fields.
// The loader interprets the table; records never parse raw text themselves.

use std::fmt;

use crate::error::RecordError;

// ============================================================================
// FIELD TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    Text,
    /// Small integer code of a named enumeration (e.g. vote_type)
    Enumeration(&'static str),
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Text => "text",
            FieldType::Enumeration(_) => "enumeration",
        }
    }

    /// Coerce a raw cell into a typed value.
    ///
    /// Booleans never fail: anything outside `true`/`1`/`yes`
    /// (case-insensitive) is false.
    pub fn coerce(&self, field: &str, raw: &str) -> Result<FieldValue, RecordError> {
        let conversion_error = || RecordError::FieldConversion {
            line: 0,
            field: field.to_string(),
            target: self.to_string(),
            value: raw.to_string(),
        };

        match self {
            FieldType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| conversion_error()),
            FieldType::Float => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| conversion_error()),
            FieldType::Boolean => Ok(FieldValue::Boolean(parse_flag(raw))),
            FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldType::Enumeration(_) => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Code)
                .map_err(|_| conversion_error()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Enumeration(name) => write!(f, "enumeration {}", name),
            other => f.write_str(other.name()),
        }
    }
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

// ============================================================================
// FIELD VALUES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Code(i64),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<i64> {
        match self {
            FieldValue::Code(v) => Some(*v),
            _ => None,
        }
    }
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// One column of a record shape.
///
/// Required fields must appear in the input header. Optional fields are
/// read when the column exists and otherwise fall back to the record's
/// default, which lets an enriched output file be loaded again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        FieldSpec {
            name,
            field_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        FieldSpec {
            name,
            field_type,
            required: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
