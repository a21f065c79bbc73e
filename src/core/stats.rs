//! Conversation statistics.
//!
//! [`aggregate`] makes one pass over the export's messages and produces a
//! [`StatsResult`]: participant list, message count, first/last message
//! dates, a ranked list of senders, media tallies, and the reaction total.
//!
//! # Sender Ranking
//!
//! Senders are counted in an insertion-ordered map and then stably sorted by
//! descending count, so senders with equal counts appear in the order they
//! first sent a message in the export.
//!
//! # Empty Conversations
//!
//! With no messages there is no first or last date. By default both are
//! reported as `None` (serialized as `null`); with
//! [`EmptyConversationPolicy::Reject`] [`aggregate_with`] fails instead.
//!
//! # Example
//!
//! ```
//! use chatstats::core::stats::aggregate;
//! use chatstats::models::{ChatExport, Message};
//!
//! let export = ChatExport::new("chat")
//!     .with_participant("Alice")
//!     .with_participant("Bob")
//!     .with_message(Message::new("Bob", 2_000))
//!     .with_message(Message::new("Alice", 1_000))
//!     .with_message(Message::new("Bob", 3_000));
//!
//! let stats = aggregate(&export);
//! assert_eq!(stats.message_count, 3);
//! assert_eq!(stats.top_senders[0].name, "Bob");
//! assert_eq!(stats.top_senders[0].count, 2);
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::{EmptyConversationPolicy, StatsConfig};
use crate::core::normalize::sorted_by_time;
use crate::error::{ChatstatsError, Result};
use crate::models::ChatExport;

/// Summary of one conversation. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    pub conversation_title: String,
    pub participant_count: usize,
    /// Participant names in export order, duplicates retained.
    pub participants: Vec<String>,
    pub message_count: usize,
    /// `None` when the export has no messages or the timestamp is out of range.
    pub first_message_date: Option<DateTime<Utc>>,
    /// `None` when the export has no messages or the timestamp is out of range.
    pub last_message_date: Option<DateTime<Utc>>,
    /// Senders ranked by descending message count.
    pub top_senders: Vec<SenderCount>,
    pub media_count: MediaCount,
    pub reaction_count: usize,
}

/// Message total for one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCount {
    pub name: String,
    pub count: usize,
}

/// Media items across the conversation, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaCount {
    pub photos: usize,
    pub videos: usize,
    pub audio: usize,
}

impl MediaCount {
    pub fn total(&self) -> usize {
        self.photos + self.videos + self.audio
    }
}

/// Computes statistics for an export.
///
/// Empty exports yield `None` for both dates.
pub fn aggregate(export: &ChatExport) -> StatsResult {
    let participants = export.participant_names();
    let participant_count = participants.len();
    let message_count = export.messages.len();

    let sorted = sorted_by_time(&export.messages);
    let first_message_date = sorted.first().and_then(|m| m.timestamp());
    let last_message_date = sorted.last().and_then(|m| m.timestamp());

    let mut by_sender: IndexMap<&str, usize> = IndexMap::new();
    let mut media_count = MediaCount::default();
    let mut reaction_count = 0;

    for message in &export.messages {
        *by_sender.entry(message.sender_name.as_str()).or_insert(0) += 1;

        media_count.photos += message.photos().len();
        media_count.videos += message.videos().len();
        media_count.audio += message.audio_files().len();

        reaction_count += message.reactions().len();
    }

    let mut top_senders: Vec<SenderCount> = by_sender
        .into_iter()
        .map(|(name, count)| SenderCount {
            name: name.to_string(),
            count,
        })
        .collect();
    // Stable: equal counts keep first-appearance order.
    top_senders.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(
        messages = message_count,
        senders = top_senders.len(),
        media = media_count.total(),
        reactions = reaction_count,
        "aggregated conversation statistics"
    );

    StatsResult {
        conversation_title: export.title.clone(),
        participant_count,
        participants,
        message_count,
        first_message_date,
        last_message_date,
        top_senders,
        media_count,
        reaction_count,
    }
}

/// Computes statistics, honouring the configured empty-conversation policy.
pub fn aggregate_with(export: &ChatExport, config: &StatsConfig) -> Result<StatsResult> {
    if export.is_empty() && config.empty_conversation == EmptyConversationPolicy::Reject {
        return Err(ChatstatsError::EmptyConversation);
    }
    Ok(aggregate(export))
}

/// Computes statistics for an unvalidated JSON value.
///
/// Fails with [`ChatstatsError::InvalidInput`] when `messages` or
/// `participants` is absent or the document cannot be decoded. Callers that
/// already ran [`validate`](crate::parsing::validate) should use
/// [`aggregate`] directly.
pub fn aggregate_value(value: &Value) -> Result<StatsResult> {
    if value.get("messages").is_none() || value.get("participants").is_none() {
        return Err(ChatstatsError::invalid_input(
            "chat export requires `messages` and `participants`",
        ));
    }

    let export = ChatExport::deserialize(value)
        .map_err(|e| ChatstatsError::invalid_input(format!("malformed chat export: {e}")))?;

    Ok(aggregate(&export))
}

impl StatsResult {
    /// Human-readable summary, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        let title = if self.conversation_title.is_empty() {
            "(untitled)"
        } else {
            &self.conversation_title
        };
        lines.push(format!("Conversation: {}", title));
        lines.push(format!(
            "Participants: {} ({})",
            self.participant_count,
            self.participants.join(", ")
        ));
        lines.push(format!("Messages:     {}", self.message_count));
        lines.push(format!("First:        {}", format_date(self.first_message_date)));
        lines.push(format!("Last:         {}", format_date(self.last_message_date)));
        lines.push(format!(
            "Media:        {} photos, {} videos, {} audio",
            self.media_count.photos, self.media_count.videos, self.media_count.audio
        ));
        lines.push(format!("Reactions:    {}", self.reaction_count));

        if !self.top_senders.is_empty() {
            lines.push("Top senders:".to_string());
            for (rank, sender) in self.top_senders.iter().enumerate() {
                lines.push(format!("  {:>2}. {} ({})", rank + 1, sender.name, sender.count));
            }
        }

        lines
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaRef, Message, Reaction};
    use serde_json::json;

    fn scenario_a() -> ChatExport {
        ChatExport::new("")
            .with_participant("Alice")
            .with_participant("Bob")
            .with_message(Message::new("Alice", 1000).with_content("hi"))
            .with_message(
                Message::new("Bob", 2000)
                    .with_content("yo")
                    .with_reaction(Reaction::new("❤️", "Alice")),
            )
    }

    #[test]
    fn test_scenario_a() {
        let stats = aggregate(&scenario_a());
        assert_eq!(stats.participant_count, 2);
        assert_eq!(stats.message_count, 2);
        assert_eq!(
            stats.top_senders,
            vec![
                SenderCount { name: "Alice".into(), count: 1 },
                SenderCount { name: "Bob".into(), count: 1 },
            ]
        );
        assert_eq!(stats.reaction_count, 1);
        assert_eq!(stats.media_count, MediaCount::default());
    }

    #[test]
    fn test_first_and_last_dates_use_sorted_order() {
        let export = ChatExport::new("t")
            .with_participant("A")
            .with_message(Message::new("A", 3_000))
            .with_message(Message::new("A", 1_000))
            .with_message(Message::new("A", 2_000));
        let stats = aggregate(&export);
        assert_eq!(stats.first_message_date.unwrap().timestamp_millis(), 1_000);
        assert_eq!(stats.last_message_date.unwrap().timestamp_millis(), 3_000);
    }

    #[test]
    fn test_top_senders_descending_with_stable_ties() {
        let export = ChatExport::new("t")
            .with_message(Message::new("Carol", 1))
            .with_message(Message::new("Dave", 2))
            .with_message(Message::new("Erin", 3))
            .with_message(Message::new("Erin", 4))
            .with_message(Message::new("Dave", 5));
        let stats = aggregate(&export);
        let names: Vec<_> = stats.top_senders.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dave", "Erin", "Carol"]);
    }

    #[test]
    fn test_media_counts() {
        let export = ChatExport::new("t")
            .with_message(
                Message::new("A", 1)
                    .with_photo(MediaRef::new("p1"))
                    .with_photo(MediaRef::new("p2"))
                    .with_video(MediaRef::new("v1")),
            )
            .with_message(Message::new("B", 2).with_audio(MediaRef::new("a1")))
            .with_message(Message::new("B", 3).with_photo(MediaRef::new("p3")));
        let stats = aggregate(&export);
        assert_eq!(
            stats.media_count,
            MediaCount { photos: 3, videos: 1, audio: 1 }
        );
        assert_eq!(stats.media_count.total(), 5);
    }

    #[test]
    fn test_participants_keep_duplicates_and_order() {
        let export = ChatExport::new("t")
            .with_participant("Zed")
            .with_participant("Amy")
            .with_participant("Zed");
        let stats = aggregate(&export);
        assert_eq!(stats.participants, vec!["Zed", "Amy", "Zed"]);
        assert_eq!(stats.participant_count, 3);
    }

    #[test]
    fn test_empty_conversation_sentinel() {
        let export = ChatExport::new("quiet").with_participant("A");
        let stats = aggregate(&export);
        assert_eq!(stats.message_count, 0);
        assert!(stats.first_message_date.is_none());
        assert!(stats.last_message_date.is_none());
        assert!(stats.top_senders.is_empty());
    }

    #[test]
    fn test_empty_conversation_reject_policy() {
        let export = ChatExport::new("quiet").with_participant("A");
        let config = StatsConfig::new().with_empty_conversation(EmptyConversationPolicy::Reject);
        let err = aggregate_with(&export, &config).unwrap_err();
        assert!(err.is_empty_conversation());

        let ok = aggregate_with(&scenario_a(), &config).unwrap();
        assert_eq!(ok.message_count, 2);
    }

    #[test]
    fn test_sentinel_dates_serialize_as_null() {
        let stats = aggregate(&ChatExport::new("quiet"));
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["firstMessageDate"].is_null());
        assert!(json["lastMessageDate"].is_null());
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(aggregate(&scenario_a())).unwrap();
        assert_eq!(json["participantCount"], 2);
        assert_eq!(json["messageCount"], 2);
        assert_eq!(json["reactionCount"], 1);
        assert_eq!(json["mediaCount"]["photos"], 0);
        assert_eq!(json["topSenders"][0]["name"], "Alice");
        assert_eq!(json["firstMessageDate"], "1970-01-01T00:00:01Z");
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let export = scenario_a();
        assert_eq!(aggregate(&export), aggregate(&export));
    }

    #[test]
    fn test_aggregate_value_missing_fields() {
        let err = aggregate_value(&json!({"messages": []})).unwrap_err();
        assert!(err.is_invalid_input());
        let err = aggregate_value(&json!({"participants": []})).unwrap_err();
        assert!(err.is_invalid_input());
        let err = aggregate_value(&json!(null)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_aggregate_value_ok() {
        let value = json!({
            "participants": [{"name": "Alice"}],
            "messages": [{"sender_name": "Alice", "timestamp_ms": 5}],
            "title": "solo"
        });
        let stats = aggregate_value(&value).unwrap();
        assert_eq!(stats.conversation_title, "solo");
        assert_eq!(stats.message_count, 1);
    }

    #[test]
    fn test_summary_lines() {
        let lines = aggregate(&scenario_a()).summary_lines();
        assert!(lines.iter().any(|l| l.contains("Messages:     2")));
        assert!(lines.iter().any(|l| l.contains("1. Alice (1)")));
        assert!(lines[0].contains("(untitled)"));

        let empty = aggregate(&ChatExport::new("quiet")).summary_lines();
        assert!(empty.iter().any(|l| l.contains("Invalid Date")));
    }
}
