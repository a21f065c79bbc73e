//! Per-kind content listings.
//!
//! [`extract_by_kind`] lists either the text of every message or every
//! individual photo, video, or audio item, most recent first.
//!
//! # Ordering
//!
//! Records are stably sorted by descending timestamp. Records sharing a
//! timestamp keep export order, and media items from one message keep their
//! order within the message. Records whose timestamp is out of range sort
//! after every dated record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ChatExport, MediaRef, Message};

/// Which content to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Message text
    Text,

    /// Photo attachments
    #[cfg_attr(feature = "cli", value(alias = "photo"))]
    #[serde(alias = "photo")]
    Photos,

    /// Video attachments
    #[cfg_attr(feature = "cli", value(alias = "video"))]
    #[serde(alias = "video")]
    Videos,

    /// Audio attachments
    #[cfg_attr(feature = "cli", value(alias = "audio_files"))]
    #[serde(alias = "audio_files")]
    Audio,
}

impl ContentKind {
    /// Returns all supported kind names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &["text", "photos", "photo", "videos", "video", "audio", "audio_files"]
    }

    fn media<'a>(&self, message: &'a Message) -> &'a [MediaRef] {
        match self {
            ContentKind::Text => &[],
            ContentKind::Photos => message.photos(),
            ContentKind::Videos => message.videos(),
            ContentKind::Audio => message.audio_files(),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Text => write!(f, "text"),
            ContentKind::Photos => write!(f, "photos"),
            ContentKind::Videos => write!(f, "videos"),
            ContentKind::Audio => write!(f, "audio"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "photos" | "photo" => Ok(ContentKind::Photos),
            "videos" | "video" => Ok(ContentKind::Videos),
            "audio" | "audio_files" => Ok(ContentKind::Audio),
            _ => Err(format!(
                "Unknown content kind: '{}'. Expected one of: {}",
                s,
                ContentKind::all_names().join(", ")
            )),
        }
    }
}

/// The extracted payload: message text or a single media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Media(MediaRef),
}

impl ContentItem {
    /// Text, or the media URI.
    pub fn as_display(&self) -> &str {
        match self {
            ContentItem::Text(text) => text,
            ContentItem::Media(media) => &media.uri,
        }
    }

    pub fn as_media(&self) -> Option<&MediaRef> {
        match self {
            ContentItem::Media(media) => Some(media),
            ContentItem::Text(_) => None,
        }
    }
}

/// One extracted item with its message's sender and send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub sender: String,
    /// `None` if the message timestamp is out of range.
    pub timestamp: Option<DateTime<Utc>>,
    pub content: ContentItem,
}

/// Lists content of one kind, most recent first.
///
/// Text yields one record per message with non-empty `content`; media kinds
/// yield one record per item, so a message with three photos contributes
/// three records.
///
/// # Example
///
/// ```
/// use chatstats::core::content::{ContentKind, extract_by_kind};
/// use chatstats::models::{ChatExport, MediaRef, Message};
///
/// let export = ChatExport::new("t")
///     .with_message(Message::new("A", 1).with_content("old"))
///     .with_message(Message::new("B", 2).with_content("new"))
///     .with_message(Message::new("C", 3).with_photo(MediaRef::new("p.jpg")));
///
/// let text = extract_by_kind(&export, ContentKind::Text);
/// assert_eq!(text.len(), 2);
/// assert_eq!(text[0].content.as_display(), "new");
/// ```
pub fn extract_by_kind(export: &ChatExport, kind: ContentKind) -> Vec<ContentRecord> {
    let mut records = Vec::new();

    for message in &export.messages {
        let timestamp = message.timestamp();
        let sender = &message.sender_name;

        if kind == ContentKind::Text {
            if let Some(text) = message.content.as_deref().filter(|t| !t.is_empty()) {
                records.push(ContentRecord {
                    sender: sender.clone(),
                    timestamp,
                    content: ContentItem::Text(text.to_string()),
                });
            }
            continue;
        }

        for media in kind.media(message) {
            records.push(ContentRecord {
                sender: sender.clone(),
                timestamp,
                content: ContentItem::Media(media.clone()),
            });
        }
    }

    // Stable sort; `None` orders below every date, so it lands last.
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(kind = %kind, records = records.len(), "extracted conversation content");

    records
}
