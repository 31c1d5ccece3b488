use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tablesmith_core::{Row, TableSchema};

use crate::errors::GenerationError;

/// Write rows as CSV with a header of field names in schema order.
///
/// Returns the number of bytes written.
pub fn write_rows_csv(
    path: &Path,
    schema: &TableSchema,
    rows: &[Row],
) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    write_rows_csv_to(writer, schema, rows)
}

pub fn write_rows_csv_to<W: Write>(
    writer: W,
    schema: &TableSchema,
    rows: &[Row],
) -> Result<u64, GenerationError> {
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    let header: Vec<&str> = schema
        .fields
        .iter()
        .map(|field| field.field_name.as_str())
        .collect();
    writer.write_record(&header)?;

    for row in rows {
        let record: Vec<&str> = header
            .iter()
            .map(|name| row.get(name).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
