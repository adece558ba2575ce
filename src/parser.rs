// 🏗️ Record Loader
// Reads a delimited file with a header row and coerces every cell through
// the record's field table.
//
// Two entry points:
// - load_records: ordered Vec<T>, file order
// - load_keyed:   Registry<T> keyed by the `id` column

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

use crate::attributes::FieldSpec;
use crate::entities::{RecordId, Registry};
use crate::error::RecordError;
use crate::schema::{require_id, validate_header, validate_schema, Record, Row};

/// Default column delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse a file into records, in file order
pub fn load_records<T: Record>(path: &Path, delimiter: u8) -> Result<Vec<T>, RecordError> {
    let rows = read_rows::<T>(path, delimiter)?;

    let records = rows
        .iter()
        .map(|(line, row)| T::from_row(row).map_err(|e| e.at_line(*line)))
        .collect::<Result<Vec<T>, RecordError>>()?;

    debug!(record = T::KIND, path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Parse a file into an id-keyed registry.
///
/// Fails with a schema error when `T` has no integer `id` field. A repeated
/// id replaces the earlier record in its original position.
pub fn load_keyed<T: Record>(path: &Path, delimiter: u8) -> Result<Registry<T>, RecordError> {
    require_id::<T>()?;
    let rows = read_rows::<T>(path, delimiter)?;

    let mut registry = Registry::new();
    for (line, row) in &rows {
        let id: RecordId = row.integer("id").map_err(|e| e.at_line(*line))?;
        let record = T::from_row(row).map_err(|e| e.at_line(*line))?;

        if registry.insert(id, record).is_some() {
            warn!(record = T::KIND, id, line, path = %path.display(), "duplicate id, later row wins");
        }
    }

    debug!(record = T::KIND, path = %path.display(), count = registry.len(), "loaded keyed records");
    Ok(registry)
}

// ============================================================================
// ROW READING
// ============================================================================

/// Read and coerce every data row, tagged with its line number
fn read_rows<T: Record>(path: &Path, delimiter: u8) -> Result<Vec<(u64, Row)>, RecordError> {
    validate_schema::<T>()?;

    let file = File::open(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(file);

    let csv_error = |source: csv::Error| RecordError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();
    validate_header::<T>(&headers)?;

    // Only declared fields that exist as columns are read
    let columns: Vec<(&FieldSpec, usize)> = T::FIELDS
        .iter()
        .filter_map(|spec| {
            headers
                .iter()
                .position(|h| h == spec.name)
                .map(|index| (spec, index))
        })
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = coerce_row::<T>(&record, &columns).map_err(|e| e.at_line(line))?;
        rows.push((line, row));
    }

    Ok(rows)
}

fn coerce_row<T: Record>(
    record: &StringRecord,
    columns: &[(&FieldSpec, usize)],
) -> Result<Row, RecordError> {
    let mut row = Row::new(T::KIND);
    for (spec, index) in columns {
        let raw = record.get(*index).unwrap_or("");
        row.insert(spec.name, spec.field_type.coerce(spec.name, raw)?);
    }
    Ok(row)
}

// ============================================================================
// TESTS
// ============================================================================
