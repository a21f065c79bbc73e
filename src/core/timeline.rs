//! Monthly message counts.
//!
//! Each message is assigned to the calendar month of its timestamp in UTC,
//! formatted as `YYYY-MM`. No viewer timezone is applied.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatstatsError, Result};
use crate::models::ChatExport;

/// Message count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBucket {
    /// `YYYY-MM` in UTC.
    pub period: String,
    pub message_count: usize,
}

/// Groups messages by UTC month, ordered chronologically.
///
/// Periods use chrono's `%Y-%m`. Years outside 0000..=9999 carry a sign and
/// are not padded to six digits the way JavaScript's `toISOString` pads
/// them: year 10000 is `+10000-01` here, `+010000-01` there. Ordering is by
/// numeric year and month, so such periods still sort after `9999-12`.
///
/// Fails with [`ChatstatsError::InvalidInput`] if any timestamp is outside
/// the representable date range.
///
/// # Example
///
/// ```
/// use chatstats::core::timeline::timeline;
/// use chatstats::models::{ChatExport, Message};
///
/// let export = ChatExport::new("t")
///     .with_message(Message::new("A", 1_000))
///     .with_message(Message::new("B", 2_000));
///
/// let buckets = timeline(&export)?;
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets[0].period, "1970-01");
/// assert_eq!(buckets[0].message_count, 2);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn timeline(export: &ChatExport) -> Result<Vec<TimelineBucket>> {
    let mut by_month: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();

    for message in &export.messages {
        let timestamp = message.timestamp().ok_or_else(|| {
            ChatstatsError::invalid_input(format!(
                "timestamp out of range: {}",
                message.timestamp_ms
            ))
        })?;
        by_month
            .entry((timestamp.year(), timestamp.month()))
            .or_insert_with(|| (timestamp.format("%Y-%m").to_string(), 0))
            .1 += 1;
    }

    debug!(buckets = by_month.len(), "built conversation timeline");

    Ok(by_month
        .into_values()
        .map(|(period, message_count)| TimelineBucket {
            period,
            message_count,
        })
        .collect())
}
