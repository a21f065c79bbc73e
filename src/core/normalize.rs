//! Chronological ordering of messages.
//!
//! Exports list messages in whatever order Instagram wrote them (usually
//! newest first). Everything that needs time order goes through
//! [`sorted_by_time`], which never reorders the caller's data.

use crate::models::{ChatExport, Message};

/// Returns the messages ordered oldest first.
///
/// The sort is stable: messages with equal `timestamp_ms` keep their
/// relative export order. The input slice is not modified.
///
/// # Example
///
/// ```
/// use chatstats::core::normalize::sorted_by_time;
/// use chatstats::models::Message;
///
/// let messages = vec![Message::new("B", 2_000), Message::new("A", 1_000)];
/// let sorted = sorted_by_time(&messages);
///
/// assert_eq!(sorted[0].sender_name, "A");
/// assert_eq!(messages[0].sender_name, "B");
/// ```
pub fn sorted_by_time(messages: &[Message]) -> Vec<&Message> {
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by_key(|m| m.timestamp_ms);
    sorted
}

/// The earliest message, ties resolved in favour of export order.
pub fn first_message(messages: &[Message]) -> Option<&Message> {
    messages.iter().min_by_key(|m| m.timestamp_ms)
}

/// The latest message, ties resolved in favour of the last in export order.
pub fn last_message(messages: &[Message]) -> Option<&Message> {
    messages.iter().max_by_key(|m| m.timestamp_ms)
}

impl ChatExport {
    /// Iterates over the messages oldest first.
    pub fn chronological(&self) -> impl Iterator<Item = &Message> {
        sorted_by_time(&self.messages).into_iter()
    }
}
