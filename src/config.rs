//! Pipeline configuration.
//!
//! [`StatsConfig`] is built once by the embedding application (or the CLI)
//! and passed by reference to every pipeline call. Nothing in the pipeline
//! reads environment variables or other process-wide state.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{EmptyConversationPolicy, StatsConfig};
//!
//! let config = StatsConfig::new()
//!     .with_fix_encoding(true)
//!     .with_empty_conversation(EmptyConversationPolicy::Reject);
//!
//! assert!(config.fix_encoding);
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};

/// What to do when an export contains zero messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyConversationPolicy {
    /// Produce statistics whose first/last dates are the invalid-date
    /// sentinel (`None`, serialized as `null`).
    #[default]
    Sentinel,

    /// Fail with [`ChatstatsError::EmptyConversation`].
    Reject,
}

impl std::fmt::Display for EmptyConversationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyConversationPolicy::Sentinel => write!(f, "sentinel"),
            EmptyConversationPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for EmptyConversationPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentinel" => Ok(EmptyConversationPolicy::Sentinel),
            "reject" | "error" => Ok(EmptyConversationPolicy::Reject),
            _ => Err(format!(
                "Unknown empty-conversation policy: '{}'. Expected one of: sentinel, reject",
                s
            )),
        }
    }
}

/// Configuration shared by the upload boundary and the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Repair Meta's Latin-1 mojibake in names and text (default: false)
    pub fix_encoding: bool,

    /// Behaviour for exports without messages (default: sentinel)
    pub empty_conversation: EmptyConversationPolicy,

    /// Largest accepted upload in bytes (default: 50MB)
    pub max_upload_bytes: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            fix_encoding: false,
            empty_conversation: EmptyConversationPolicy::Sentinel,
            max_upload_bytes: 50 * 1024 * 1024, // 50MB
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from a JSON string.
    ///
    /// Missing keys take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ChatstatsError::config(e.to_string()))
    }

    /// Reads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Enables or disables mojibake repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, enabled: bool) -> Self {
        self.fix_encoding = enabled;
        self
    }

    /// Sets the empty-conversation policy.
    #[must_use]
    pub fn with_empty_conversation(mut self, policy: EmptyConversationPolicy) -> Self {
        self.empty_conversation = policy;
        self
    }

    /// Sets the maximum upload size.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, size: usize) -> Self {
        self.max_upload_bytes = size;
        self
    }
}
