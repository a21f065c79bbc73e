//! Output format writers.
//!
//! This module provides writers for pipeline results:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty-printed JSON array
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one JSON object per line)
//!
//! JSON writers accept any [`Serialize`](serde::Serialize) rows. CSV rows
//! must implement [`CsvRecord`], which flattens nested values such as media
//! references into plain columns.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::output::{to_csv, to_json};
//! use chatstats::TimelineBucket;
//!
//! let buckets = vec![TimelineBucket { period: "2024-01".into(), message_count: 3 }];
//!
//! let csv = to_csv(&buckets)?;
//! assert_eq!(csv, "Period;MessageCount\n2024-01;3\n");
//!
//! let json = to_json(&buckets)?;
//! assert!(json.contains("\"messageCount\": 3"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl};

use crate::core::content::ContentRecord;
use crate::core::timeline::TimelineBucket;

/// A row type that can be written as flat CSV.
pub trait CsvRecord {
    /// Column names, in record order.
    fn header() -> &'static [&'static str];

    /// One row of values matching [`header`](CsvRecord::header).
    fn record(&self) -> Vec<String>;
}

impl CsvRecord for TimelineBucket {
    fn header() -> &'static [&'static str] {
        &["Period", "MessageCount"]
    }

    fn record(&self) -> Vec<String> {
        vec![self.period.clone(), self.message_count.to_string()]
    }
}

impl CsvRecord for ContentRecord {
    fn header() -> &'static [&'static str] {
        &["Timestamp", "Sender", "Content"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.timestamp
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            self.sender.clone(),
            self.content.as_display().to_string(),
        ]
    }
}
