//! Output format selection.
//!
//! [`OutputFormat`] names the row formats the writers in
//! [`core::output`](crate::core::output) produce, and [`write_to_format`] /
//! [`to_format_string`] dispatch to the matching writer.
//!
//! # Example
//!
//! ```rust
//! use chatstats::format::{OutputFormat, to_format_string};
//! use chatstats::TimelineBucket;
//!
//! let buckets = vec![TimelineBucket { period: "2024-01".into(), message_count: 3 }];
//! let jsonl = to_format_string(&buckets, OutputFormat::Jsonl)?;
//! assert_eq!(jsonl, "{\"period\":\"2024-01\",\"messageCount\":3}\n");
//!
//! let format = OutputFormat::from_path("timeline.csv")?;
//! assert_eq!(format, OutputFormat::Csv);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::output::CsvRecord;
use crate::error::{ChatstatsError, Result};

/// Row output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Pretty-printed JSON array (default)
    #[default]
    Json,

    /// JSON Lines - one JSON object per line
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv]
    }

    /// Detects format from a file path based on extension.
    ///
    /// `.ndjson` is accepted as JSON Lines.
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ext == "ndjson" {
            return Ok(OutputFormat::Jsonl);
        }

        Self::all()
            .iter()
            .copied()
            .find(|format| format.extension() == ext)
            .ok_or_else(|| {
                ChatstatsError::output_format(format!(
                    "unknown file extension '.{}', expected one of: json, jsonl, csv",
                    ext
                ))
            })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes rows to a file in the specified format.
pub fn write_to_format<T: Serialize + CsvRecord>(
    rows: &[T],
    path: &str,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => crate::core::output::write_json(rows, path),
        OutputFormat::Jsonl => crate::core::output::write_jsonl(rows, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(rows, path),
        #[allow(unreachable_patterns)]
        _ => Err(csv_disabled()),
    }
}

/// Converts rows to a string in the specified format.
pub fn to_format_string<T: Serialize + CsvRecord>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => crate::core::output::to_json(rows),
        OutputFormat::Jsonl => crate::core::output::to_jsonl(rows),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(rows),
        #[allow(unreachable_patterns)]
        _ => Err(csv_disabled()),
    }
}

#[allow(dead_code)]
fn csv_disabled() -> ChatstatsError {
    ChatstatsError::output_format("CSV output requires the 'csv-output' feature to be enabled")
}
