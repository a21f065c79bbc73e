//! Repair of Meta's broken text encoding (mojibake).
//!
//! Meta exports UTF-8 text as if it were ISO-8859-1: every UTF-8 byte is
//! stored as a separate code point. "Привет" arrives as "ÐŸÑ€Ð¸Ð²ÐµÑ‚".
//! Taking each char as its byte value and decoding the bytes again as UTF-8
//! restores the original.

use crate::models::ChatExport;

/// Reverses Latin-1 mojibake.
///
/// Strings that contain a code point above U+00FF were not produced by the
/// broken encoder, and byte sequences that are not valid UTF-8 cannot be
/// repaired; both are returned unchanged.
///
/// # Example
///
/// ```
/// use chatstats::parsing::fix_mojibake_encoding;
///
/// assert_eq!(fix_mojibake_encoding("Hello"), "Hello");
/// assert_eq!(fix_mojibake_encoding("Ã©tÃ©"), "été");
/// assert_eq!(fix_mojibake_encoding("已经"), "已经");
/// ```
pub fn fix_mojibake_encoding(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }

    let mut bytes = Vec::with_capacity(s.len());
    for c in s.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => bytes.push(b),
            Err(_) => return s.to_string(),
        }
    }

    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Repairs every human-readable string the pipeline reports on.
pub fn fix_export_encoding(export: &mut ChatExport) {
    export.title = fix_mojibake_encoding(&export.title);

    for participant in &mut export.participants {
        participant.name = fix_mojibake_encoding(&participant.name);
    }

    for message in &mut export.messages {
        message.sender_name = fix_mojibake_encoding(&message.sender_name);
        if let Some(content) = message.content.as_mut() {
            *content = fix_mojibake_encoding(content);
        }
        if let Some(reactions) = message.reactions.as_mut() {
            for reaction in reactions {
                reaction.reaction = fix_mojibake_encoding(&reaction.reaction);
                reaction.actor = fix_mojibake_encoding(&reaction.actor);
            }
        }
    }
}
