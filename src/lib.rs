//! # Chatstats
//!
//! Ingestion and statistics for Instagram direct-message exports.
//!
//! ## Overview
//!
//! An uploaded export (`message_1.json` from Instagram's "Download Your
//! Data") goes through a short linear pipeline:
//!
//! 1. **Validate** - parse JSON and check the chat-export shape
//!    ([`parsing`])
//! 2. **Aggregate** - participants, sender ranking, media and reaction
//!    tallies, first/last message dates ([`core::stats`])
//! 3. **Timeline** - messages per UTC calendar month ([`core::timeline`])
//! 4. **Extract** - text or media items, most recent first
//!    ([`core::content`])
//!
//! Every call is synchronous and stateless: the same document always yields
//! the same result, and nothing is cached or persisted.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = parse_export(r#"{
//!         "participants": [{"name": "Alice"}, {"name": "Bob"}],
//!         "messages": [
//!             {"sender_name": "Alice", "timestamp_ms": 1000, "content": "hi"},
//!             {"sender_name": "Bob", "timestamp_ms": 2000, "content": "yo",
//!              "reactions": [{"reaction": "❤️", "actor": "Alice"}]}
//!         ]
//!     }"#)?;
//!
//!     let stats = aggregate(&export);
//!     assert_eq!(stats.message_count, 2);
//!     assert_eq!(stats.reaction_count, 1);
//!
//!     let months = timeline(&export)?;
//!     assert_eq!(months[0].period, "1970-01");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Handling Uploads
//!
//! Request handlers should go through [`upload::process_upload`], which adds
//! the file-type and size gates and turns every failure into one
//! user-facing message.
//!
//! ## Module Structure
//!
//! - [`models`] - [`ChatExport`], [`Message`](models::Message), media and reaction types
//! - [`parsing`] - JSON parsing, shape validation, encoding repair
//! - [`core`] - pipeline stages and output writers
//! - [`upload`] - the upload boundary
//! - [`config`] - [`StatsConfig`](config::StatsConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`cli`] - CLI argument types (requires the `cli` feature)
//! - [`error`] - [`ChatstatsError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod models;
pub mod parsing;
pub mod upload;

// Re-export the main types at the crate root for convenience
pub use crate::core::{StatsResult, TimelineBucket};
pub use error::{ChatstatsError, Result};
pub use models::ChatExport;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::models::{ChatExport, MediaRef, Message, Participant, Reaction};

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Configuration
    pub use crate::config::{EmptyConversationPolicy, StatsConfig};

    // Validation
    pub use crate::parsing::{parse_export, parse_export_with, parse_json, validate};

    // Pipeline stages
    pub use crate::core::{
        ContentItem, ContentKind, ContentRecord, MediaCount, SenderCount, StatsResult,
        TimelineBucket, aggregate, aggregate_with, extract_by_kind, sorted_by_time, timeline,
    };

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    // Upload boundary
    pub use crate::upload::{UploadOutcome, UploadedFile, process_upload};
}
