//! Tabular writer: enriched rows to a UTF-8 CSV file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{WriteError, WriteResult};
use crate::models::TableRow;

/// Write the header row and every record to `writer`.
///
/// The header is written even when `rows` is empty.
pub fn write_table_to<W: Write, R: TableRow>(writer: W, rows: &[R]) -> WriteResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(R::HEADERS)?;
    for row in rows {
        csv_writer.write_record(row.fields())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Create (or truncate) `path` and write the table to it.
pub fn write_table<P: AsRef<Path>, R: TableRow>(path: P, rows: &[R]) -> WriteResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table_to(file, rows)
}
