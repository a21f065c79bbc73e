//! CSV output writer.

use std::fs::File;

use super::CsvRecord;
use crate::error::Result;

/// Writes rows to a CSV file with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: [`CsvRecord::header`] of the row type
/// - Encoding: UTF-8
pub fn write_csv<T: CsvRecord>(rows: &[T], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(file);

    write_rows(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Converts rows to a CSV string with semicolon delimiter.
///
/// Same format as [`write_csv`], but returns a String instead of writing to
/// a file.
pub fn to_csv<T: CsvRecord>(rows: &[T]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    write_rows(&mut writer, rows)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_rows<W: std::io::Write, T: CsvRecord>(
    writer: &mut csv::Writer<W>,
    rows: &[T],
) -> Result<()> {
    writer.write_record(T::header())?;
    for row in rows {
        writer.write_record(row.record())?;
    }
    Ok(())
}
