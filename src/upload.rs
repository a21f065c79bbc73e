//! The upload boundary.
//!
//! [`process_upload`] is what a request handler calls with the uploaded file:
//! it gates the file type and size, decodes the text, validates the export,
//! computes statistics, and reports the result as an [`UploadOutcome`] with a
//! single human-readable message on failure.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::StatsConfig;
//! use chatstats::upload::{UploadedFile, process_upload};
//!
//! let file = UploadedFile::new(
//!     "message_1.json",
//!     "application/json",
//!     br#"{"participants": [{"name": "Alice"}], "messages": []}"#.to_vec(),
//! );
//!
//! let outcome = process_upload(&file, &StatsConfig::default());
//! assert!(outcome.success);
//! assert_eq!(outcome.stats.unwrap().participant_count, 1);
//!
//! let bad = UploadedFile::new("notes.txt", "text/plain", b"hello".to_vec());
//! let outcome = process_upload(&bad, &StatsConfig::default());
//! assert_eq!(outcome.message.as_deref(), Some("Only JSON files are allowed"));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::StatsConfig;
use crate::core::stats::{StatsResult, aggregate_with};
use crate::error::{ChatstatsError, Result};
use crate::models::ChatExport;
use crate::parsing::parse_export_with;

/// A file received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing the MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = if name.to_lowercase().ends_with(".json") {
            "application/json"
        } else {
            "application/octet-stream"
        };
        Ok(Self::new(name, mime_type, bytes))
    }

    /// The file content as text. Invalid UTF-8 is replaced, not rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Result reported back to the uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The validated export, handed back for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsResult>,
}

impl UploadOutcome {
    fn ok(data: ChatExport, stats: StatsResult) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            stats: Some(stats),
        }
    }

    fn failed(err: &ChatstatsError) -> Self {
        Self {
            success: false,
            message: Some(err.user_message()),
            data: None,
            stats: None,
        }
    }
}

/// Accepts a file whose name ends in `.json` or whose MIME type mentions JSON.
pub fn is_json_file(name: &str, mime_type: &str) -> bool {
    name.to_lowercase().ends_with(".json") || mime_type.contains("json")
}

/// Runs the whole pipeline on an uploaded file, failing on the first error.
pub fn load_upload(file: &UploadedFile, config: &StatsConfig) -> Result<(ChatExport, StatsResult)> {
    if file.name.is_empty() && file.bytes.is_empty() {
        return Err(ChatstatsError::NoFile);
    }

    if !is_json_file(&file.name, &file.mime_type) {
        return Err(ChatstatsError::unsupported_file(&file.name));
    }

    if file.bytes.len() > config.max_upload_bytes {
        return Err(ChatstatsError::file_too_large(
            config.max_upload_bytes,
            file.bytes.len(),
        ));
    }

    let export = parse_export_with(&file.text(), config)?;
    let stats = aggregate_with(&export, config)?;

    info!(
        file = %file.name,
        messages = stats.message_count,
        participants = stats.participant_count,
        "processed chat export upload"
    );

    Ok((export, stats))
}

/// Like [`load_upload`], but reports failures as an [`UploadOutcome`].
pub fn process_upload(file: &UploadedFile, config: &StatsConfig) -> UploadOutcome {
    match load_upload(file, config) {
        Ok((export, stats)) => UploadOutcome::ok(export, stats),
        Err(err) => {
            warn!(file = %file.name, error = %err, "rejected chat export upload");
            UploadOutcome::failed(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmptyConversationPolicy;

    const VALID: &str = r#"{
        "participants": [{"name": "Alice"}, {"name": "Bob"}],
        "messages": [
            {"sender_name": "Bob", "timestamp_ms": 2000, "content": "yo"},
            {"sender_name": "Alice", "timestamp_ms": 1000, "content": "hi"}
        ],
        "title": "Alice and Bob"
    }"#;

    fn json_file(content: &str) -> UploadedFile {
        UploadedFile::new("message_1.json", "application/json", content.as_bytes().to_vec())
    }

    #[test]
    fn test_is_json_file() {
        assert!(is_json_file("export.json", ""));
        assert!(is_json_file("EXPORT.JSON", ""));
        assert!(is_json_file("export", "application/json"));
        assert!(is_json_file("export.txt", "application/ld+json"));
        assert!(!is_json_file("export.txt", "text/plain"));
        assert!(!is_json_file("export.json.zip", "application/zip"));
    }

    #[test]
    fn test_process_valid_upload() {
        let outcome = process_upload(&json_file(VALID), &StatsConfig::default());
        assert!(outcome.success);
        assert!(outcome.message.is_none());
        let stats = outcome.stats.unwrap();
        assert_eq!(stats.conversation_title, "Alice and Bob");
        assert_eq!(stats.message_count, 2);
        assert_eq!(outcome.data.unwrap().messages.len(), 2);
    }

    #[test]
    fn test_no_file() {
        let outcome = process_upload(&UploadedFile::new("", "", vec![]), &StatsConfig::default());
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("No file uploaded"));
    }

    #[test]
    fn test_wrong_file_type() {
        let file = UploadedFile::new("chat.txt", "text/plain", VALID.as_bytes().to_vec());
        let outcome = process_upload(&file, &StatsConfig::default());
        assert_eq!(outcome.message.as_deref(), Some("Only JSON files are allowed"));
    }

    #[test]
    fn test_invalid_json() {
        let outcome = process_upload(&json_file("{not json"), &StatsConfig::default());
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Invalid JSON format"));
        assert!(outcome.stats.is_none());
    }

    #[test]
    fn test_invalid_schema() {
        let outcome = process_upload(&json_file(r#"{"messages": []}"#), &StatsConfig::default());
        assert_eq!(outcome.message.as_deref(), Some("Invalid Instagram data format"));
    }

    #[test]
    fn test_message_without_sender() {
        let content = r#"{"participants": [{"name": "A"}], "messages": [{"timestamp_ms": 1}]}"#;
        let outcome = process_upload(&json_file(content), &StatsConfig::default());
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Failed to process file"));
    }

    #[test]
    fn test_file_too_large() {
        let config = StatsConfig::new().with_max_upload_bytes(10);
        let err = load_upload(&json_file(VALID), &config).unwrap_err();
        assert!(matches!(err, ChatstatsError::FileTooLarge { max_size: 10, .. }));
    }

    #[test]
    fn test_empty_conversation_policies() {
        let empty = json_file(r#"{"participants": [{"name": "A"}], "messages": []}"#);

        let outcome = process_upload(&empty, &StatsConfig::default());
        assert!(outcome.success);
        assert!(outcome.stats.unwrap().first_message_date.is_none());

        let reject = StatsConfig::new().with_empty_conversation(EmptyConversationPolicy::Reject);
        let outcome = process_upload(&empty, &reject);
        assert!(!outcome.success);
        assert_eq!(
            outcome.message.as_deref(),
            Some("The conversation has no messages")
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut bytes = br#"{"participants": [{"name": "A"}], "messages": [{"sender_name": "A"#.to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(br#"", "timestamp_ms": 1}]}"#);
        let file = UploadedFile::new("x.json", "", bytes);
        let (export, _) = load_upload(&file, &StatsConfig::default()).unwrap();
        assert_eq!(export.messages[0].sender_name, "A\u{fffd}");
    }

    #[test]
    fn test_outcome_serialization_omits_empty_fields() {
        let outcome = process_upload(&json_file("[]"), &StatsConfig::default());
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(!json.contains("stats"));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message_1.json");
        fs::write(&path, VALID).unwrap();
        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "message_1.json");
        assert_eq!(file.mime_type, "application/json");
        assert!(process_upload(&file, &StatsConfig::default()).success);
    }
}
