// ⚠️ Error Types
// Loader/writer failures, tally lookup failures, integrity failures.
// All of them are fatal for a run: there is no retry and no partial write recovery.

use std::path::PathBuf;
use thiserror::Error;

use crate::entities::RecordId;

// ============================================================================
// RECORD ERRORS (loader + writer)
// ============================================================================

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The record shape is unusable: bad descriptor table, missing `id`
    /// for keyed loading, or a required column absent from the header.
    #[error("schema error for {record}: {message}")]
    Schema { record: String, message: String },

    #[error("line {line}: error converting field '{field}' to {target}: value {value:?}")]
    FieldConversion {
        line: u64,
        field: String,
        target: String,
        value: String,
    },

    #[error("refusing to write {path}: the record list can't be empty")]
    EmptyOutput { path: PathBuf },
}

impl RecordError {
    pub fn schema(record: impl Into<String>, message: impl Into<String>) -> Self {
        RecordError::Schema {
            record: record.into(),
            message: message.into(),
        }
    }

    /// Attach a line number to a conversion error raised while coercing a row
    pub(crate) fn at_line(self, line: u64) -> Self {
        match self {
            RecordError::FieldConversion {
                field,
                target,
                value,
                ..
            } => RecordError::FieldConversion {
                line,
                field,
                target,
                value,
            },
            other => other,
        }
    }
}

// ============================================================================
// TALLY ERRORS
// ============================================================================

/// A referenced record was not found during a tally pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    #[error("{entity} {id} not found (referenced by {referenced_by})")]
    NotFound {
        entity: &'static str,
        id: RecordId,
        referenced_by: String,
    },
}

// ============================================================================
// INTEGRITY ERRORS (strict mode)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{count} dangling reference(s): {details}")]
pub struct IntegrityError {
    pub count: usize,
    pub details: String,
}
