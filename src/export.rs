// 💾 Record Writer
// Serializes homogeneous records to a delimited file. The header comes from
// the record's field names in declaration order (serde + csv).

use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::RecordError;

/// Write records with a header row, returning the number of rows written
pub fn write_records<'a, T, I>(path: &Path, records: I, delimiter: u8) -> Result<usize, RecordError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut records = records.into_iter().peekable();
    if records.peek().is_none() {
        return Err(RecordError::EmptyOutput {
            path: path.to_path_buf(),
        });
    }

    let csv_error = |source: csv::Error| RecordError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_error)?;

    let mut written = 0;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
        written += 1;
    }

    writer.flush().map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), count = written, "wrote records");
    Ok(written)
}
