//! Typed model of an Instagram direct-message export.
//!
//! These types mirror the JSON written by Instagram's "Download Your Data"
//! feature for a single conversation thread (`message_1.json`). Fields the
//! pipeline never reads (shares, stickers, join links) are kept as raw JSON
//! so a validated document can be handed back to the caller. Typing is
//! strict only for what the pipeline consumes: sender names, timestamps,
//! text, media and reaction lists, and participant names. Unread scalar
//! metadata of the wrong type reads as absent.
//!
//! # Optional Collections
//!
//! Media and reaction lists are absent from the JSON when a message has
//! none. Both absence and an empty list mean "none"; use the accessor
//! methods ([`Message::photos`], [`Message::reactions`], ...) which return an
//! empty slice in either case.
//!
//! # Example
//!
//! ```
//! use chatstats::models::{ChatExport, MediaRef, Message};
//!
//! let export = ChatExport::new("Weekend plans")
//!     .with_participant("Alice")
//!     .with_participant("Bob")
//!     .with_message(Message::new("Alice", 1_000).with_content("hi"))
//!     .with_message(Message::new("Bob", 2_000).with_photo(MediaRef::new("photos/1.jpg")));
//!
//! assert_eq!(export.messages.len(), 2);
//! assert_eq!(export.messages[1].photos().len(), 1);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One exported conversation thread.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatExport {
    /// Conversation members in export order. Duplicate names are kept.
    pub participants: Vec<Participant>,

    /// Messages in export order, which is not necessarily chronological.
    pub messages: Vec<Message>,

    /// Conversation title. Missing, `null` or non-string titles read as
    /// the empty string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_still_participant: Option<bool>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub thread_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_words: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joinable_mode: Option<Value>,
}

impl ChatExport {
    /// Creates an empty export with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder-style method to append a participant.
    #[must_use]
    pub fn with_participant(mut self, name: impl Into<String>) -> Self {
        self.participants.push(Participant::new(name));
        self
    }

    /// Builder-style method to append a message.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Participant names in export order, duplicates retained.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    /// Returns `true` if the export contains no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A conversation member. The name is the only identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single message as exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author.
    pub sender_name: String,

    /// Send time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<MediaRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<MediaRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_files: Option<Vec<MediaRef>>,

    /// Shared link or post, kept as exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<Value>,

    /// Sticker payload, kept as exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Value>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_geoblocked_for_viewer: Option<bool>,
}

impl Message {
    /// Creates a message with no content, media, or reactions.
    pub fn new(sender_name: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            sender_name: sender_name.into(),
            timestamp_ms,
            content: None,
            reactions: None,
            photos: None,
            videos: None,
            audio_files: None,
            share: None,
            sticker: None,
            is_geoblocked_for_viewer: None,
        }
    }

    /// Builder-style method to set the text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Builder-style method to append a reaction.
    #[must_use]
    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.get_or_insert_with(Vec::new).push(reaction);
        self
    }

    /// Builder-style method to append a photo.
    #[must_use]
    pub fn with_photo(mut self, photo: MediaRef) -> Self {
        self.photos.get_or_insert_with(Vec::new).push(photo);
        self
    }

    /// Builder-style method to append a video.
    #[must_use]
    pub fn with_video(mut self, video: MediaRef) -> Self {
        self.videos.get_or_insert_with(Vec::new).push(video);
        self
    }

    /// Builder-style method to append an audio clip.
    #[must_use]
    pub fn with_audio(mut self, audio: MediaRef) -> Self {
        self.audio_files.get_or_insert_with(Vec::new).push(audio);
        self
    }

    /// The send time, or `None` if `timestamp_ms` is outside chrono's range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_ms_timestamp(self.timestamp_ms)
    }

    pub fn reactions(&self) -> &[Reaction] {
        self.reactions.as_deref().unwrap_or_default()
    }

    pub fn photos(&self) -> &[MediaRef] {
        self.photos.as_deref().unwrap_or_default()
    }

    pub fn videos(&self) -> &[MediaRef] {
        self.videos.as_deref().unwrap_or_default()
    }

    pub fn audio_files(&self) -> &[MediaRef] {
        self.audio_files.as_deref().unwrap_or_default()
    }
}

/// An emoji-like reaction applied by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub reaction: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Reaction {
    pub fn new(reaction: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            reaction: reaction.into(),
            actor: actor.into(),
            timestamp: None,
        }
    }
}

/// Pointer to a photo, video, or audio file stored next to the export.
///
/// The pipeline never opens the referenced file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default)]
    pub uri: String,

    /// Seconds since the epoch. Non-integer values read as absent.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_stickers: Option<Value>,
}

impl MediaRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            creation_timestamp: None,
            ai_stickers: None,
        }
    }

    #[must_use]
    pub fn with_creation_timestamp(mut self, ts: i64) -> Self {
        self.creation_timestamp = Some(ts);
        self
    }
}

/// Decodes a metadata field the pipeline never reads. A value of the wrong
/// type reads as absent instead of failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, String>(deserializer)?.unwrap_or_default())
}

/// Converts epoch milliseconds to a UTC timestamp.
///
/// Returns `None` for values chrono cannot represent; this is the
/// "invalid date" of the pipeline.
pub fn parse_ms_timestamp(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}
