use std::{fs::File, path::Path};

use futures_util::{pin_mut, Stream, TryStreamExt};
use serde::Serialize;

use crate::domain::error::{ExportError, ExportResult};

/// Writes `columns` as the header line followed by one line per row.
///
/// Rows must serialize their fields in `columns` order. The file is truncated
/// first and flushed before returning; the row count is returned.
///
/// File writes are blocking `std::fs` calls made on the calling task. Only the
/// row stream is awaited.
pub async fn write_table<R, S>(path: &Path, columns: &[&str], rows: S) -> ExportResult<usize>
where
    R: Serialize,
    S: Stream<Item = ExportResult<R>>,
{
    let io_error = |err: csv::Error| ExportError::io(path, err.into());

    let file = File::create(path).map_err(|err| ExportError::io(path, err))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(columns).map_err(io_error)?;

    pin_mut!(rows);
    let mut written = 0usize;
    while let Some(row) = rows.try_next().await? {
        writer.serialize(&row).map_err(io_error)?;
        written += 1;
    }

    writer.flush().map_err(|err| ExportError::io(path, err))?;
    Ok(written)
}
