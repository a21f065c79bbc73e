//! Schema validation for uploaded chat exports.
//!
//! Turning raw text into a [`ChatExport`] happens in three steps:
//!
//! 1. [`parse_json`] - the text must be JSON ([`ChatstatsError::Parse`])
//! 2. [`validate`] - shape check: `messages` must be an array and
//!    `participants` must be present ([`ChatstatsError::Schema`])
//! 3. typed decoding of the checked value ([`ChatstatsError::InvalidInput`]
//!    for malformed participants or messages)
//!
//! The shape check deliberately accepts any non-empty value for
//! `participants`; only `messages` is required to be an array.
//!
//! # Example
//!
//! ```rust
//! use chatstats::parsing::parse_export;
//!
//! let export = parse_export(r#"{"participants": [{"name": "Alice"}], "messages": []}"#)?;
//! assert_eq!(export.participants.len(), 1);
//!
//! let err = parse_export(r#"{"messages": []}"#).unwrap_err();
//! assert!(err.is_schema());
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

pub mod encoding;

use serde_json::Value;
use tracing::debug;

use crate::config::StatsConfig;
use crate::error::{ChatstatsError, Result};
use crate::models::ChatExport;

pub use encoding::{fix_export_encoding, fix_mojibake_encoding};

/// Parses raw upload text as JSON.
pub fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(ChatstatsError::parse)
}

/// Checks the chat-export shape and decodes the typed document.
pub fn validate(raw: Value) -> Result<ChatExport> {
    check_shape(&raw)?;
    decode(raw)
}

/// Parses and validates an export in one call.
pub fn parse_export(text: &str) -> Result<ChatExport> {
    validate(parse_json(text)?)
}

/// Like [`parse_export`], then applies the configured encoding repair.
pub fn parse_export_with(text: &str, config: &StatsConfig) -> Result<ChatExport> {
    let mut export = parse_export(text)?;
    if config.fix_encoding {
        fix_export_encoding(&mut export);
    }
    Ok(export)
}

/// Shape check only: no per-message validation happens here.
pub fn check_shape(raw: &Value) -> Result<()> {
    let Some(object) = raw.as_object() else {
        return Err(ChatstatsError::schema("expected a JSON object"));
    };

    match object.get("messages") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(ChatstatsError::schema("`messages` is not an array")),
        None => return Err(ChatstatsError::schema("missing `messages`")),
    }

    match object.get("participants") {
        Some(value) if is_present(value) => Ok(()),
        Some(_) => Err(ChatstatsError::schema("`participants` is empty")),
        None => Err(ChatstatsError::schema("missing `participants`")),
    }
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn decode(raw: Value) -> Result<ChatExport> {
    let export: ChatExport = serde_json::from_value(raw)
        .map_err(|e| ChatstatsError::invalid_input(format!("malformed chat export: {e}")))?;

    debug!(
        participants = export.participants.len(),
        messages = export.messages.len(),
        "validated chat export"
    );

    Ok(export)
}
