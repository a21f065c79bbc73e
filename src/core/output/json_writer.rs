//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::error::{ChatstatsError, Result};

/// Writes a value to a pretty-printed JSON file.
///
/// Rows are usually a slice, producing a JSON array:
/// ```json
/// [
///   {"period": "2024-01", "messageCount": 2}
/// ]
/// ```
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &str) -> Result<()> {
    let json = to_json(value)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a value to a pretty-printed JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(ChatstatsError::serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline::TimelineBucket;
    use std::fs;

    #[test]
    fn test_to_json_array() {
        let rows = vec![TimelineBucket {
            period: "2024-01".into(),
            message_count: 2,
        }];
        let json = to_json(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["period"], "2024-01");
        assert_eq!(parsed[0]["messageCount"], 2);
    }

    #[test]
    fn test_to_json_empty() {
        let rows: Vec<TimelineBucket> = vec![];
        assert_eq!(to_json(&rows).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&[1, 2, 3], path.to_str().unwrap()).unwrap();
        let parsed: Vec<i32> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }
}
