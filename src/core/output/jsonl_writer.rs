//! JSON Lines output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::error::{ChatstatsError, Result};

/// Writes rows to a JSONL file, one compact JSON object per line.
pub fn write_jsonl<T: Serialize>(rows: &[T], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for row in rows {
        let line = serde_json::to_string(row).map_err(ChatstatsError::serialize)?;
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts rows to a JSONL string.
pub fn to_jsonl<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut output = String::new();
    for row in rows {
        output.push_str(&serde_json::to_string(row).map_err(ChatstatsError::serialize)?);
        output.push('\n');
    }
    Ok(output)
}
