//! Core pipeline stages for chatstats.
//!
//! This module contains:
//! - [`normalize`] - Chronological ordering of messages
//! - [`stats`] - Conversation statistics
//! - [`timeline`] - Monthly message counts
//! - [`content`] - Per-kind content listings
//! - [`output`] - Format writers (JSON, JSONL, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use chatstats::core::{ContentKind, aggregate, extract_by_kind, timeline};
//! use chatstats::parsing::parse_export;
//!
//! let export = parse_export(r#"{
//!     "participants": [{"name": "Alice"}],
//!     "messages": [{"sender_name": "Alice", "timestamp_ms": 1000, "content": "hi"}]
//! }"#)?;
//!
//! let stats = aggregate(&export);
//! let months = timeline(&export)?;
//! let texts = extract_by_kind(&export, ContentKind::Text);
//!
//! assert_eq!(stats.message_count, 1);
//! assert_eq!(months[0].period, "1970-01");
//! assert_eq!(texts.len(), 1);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

pub mod content;
pub mod normalize;
pub mod output;
pub mod stats;
pub mod timeline;

// Re-export main types for convenience
pub use content::{ContentItem, ContentKind, ContentRecord, extract_by_kind};
pub use normalize::sorted_by_time;
pub use stats::{
    MediaCount, SenderCount, StatsResult, aggregate, aggregate_value, aggregate_with,
};
pub use timeline::{TimelineBucket, timeline};
