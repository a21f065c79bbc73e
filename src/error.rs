//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers every
//! failure the pipeline can report, from a malformed upload to an output
//! writer failing.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **End users** get one human-readable message per error kind via
//!   [`ChatstatsError::user_message`], never internals
//! - **Developers** get source error chains for debugging

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::TimelineBucket;
///
/// fn my_function() -> Result<Vec<TimelineBucket>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
///
/// Every variant is terminal for the current request: no partial results are
/// produced and nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// The uploaded bytes are not valid JSON.
    #[error("Invalid JSON format: {source}")]
    Parse {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but not shaped like a chat export.
    ///
    /// Raised when `messages` is missing or not an array, or when
    /// `participants` is missing.
    #[error("Invalid Instagram data format: {message}")]
    Schema {
        /// Description of what's wrong
        message: String,
    },

    /// The document passed the shape check but cannot be processed.
    ///
    /// Callers that ran [`validate`](crate::parsing::validate) first only see
    /// this for documents with malformed participants or messages, or
    /// timestamps outside the representable date range.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's wrong
        message: String,
    },

    /// The conversation has no messages and the configured policy rejects it.
    #[error("Conversation has no messages")]
    EmptyConversation,

    /// No file was provided to the upload boundary.
    #[error("No file uploaded")]
    NoFile,

    /// Neither the file name nor the MIME type indicates JSON.
    #[error("Unsupported file '{name}': only JSON files are allowed")]
    UnsupportedFile {
        /// The rejected file name
        name: String,
    },

    /// The upload exceeds the configured size limit.
    #[error("File too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    FileTooLarge {
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Actual size encountered
        actual_size: usize,
    },

    /// The requested output format is unknown or not compiled in.
    #[error("Unsupported output format: {message}")]
    OutputFormat {
        /// Description of what's wrong
        message: String,
    },

    /// The configuration file could not be understood.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of what's wrong
        message: String,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to serialize results as JSON.
    #[error("JSON output error: {source}")]
    Serialize {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// UTF-8 encoding error while producing output.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a parse error from a JSON error.
    pub fn parse(source: serde_json::Error) -> Self {
        ChatstatsError::Parse { source }
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        ChatstatsError::Schema {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ChatstatsError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an unsupported file error.
    pub fn unsupported_file(name: impl Into<String>) -> Self {
        ChatstatsError::UnsupportedFile { name: name.into() }
    }

    /// Creates a file-too-large error.
    pub fn file_too_large(max_size: usize, actual_size: usize) -> Self {
        ChatstatsError::FileTooLarge {
            max_size,
            actual_size,
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ChatstatsError::Config {
            message: message.into(),
        }
    }

    /// Creates an output format error.
    pub fn output_format(message: impl Into<String>) -> Self {
        ChatstatsError::OutputFormat {
            message: message.into(),
        }
    }

    /// Creates an output serialization error.
    pub fn serialize(source: serde_json::Error) -> Self {
        ChatstatsError::Serialize { source }
    }

    /// Returns `true` if this is a JSON parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatstatsError::Parse { .. })
    }

    /// Returns `true` if this is a schema error.
    pub fn is_schema(&self) -> bool {
        matches!(self, ChatstatsError::Schema { .. })
    }

    /// Returns `true` if this is an invalid input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ChatstatsError::InvalidInput { .. })
    }

    /// Returns `true` if the conversation was rejected for having no messages.
    pub fn is_empty_conversation(&self) -> bool {
        matches!(self, ChatstatsError::EmptyConversation)
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// The message shown to the person who uploaded the file.
    ///
    /// One fixed sentence per user-facing kind; internal details stay in
    /// [`Display`](std::fmt::Display) and the source chain.
    pub fn user_message(&self) -> String {
        match self {
            ChatstatsError::Parse { .. } => "Invalid JSON format".to_string(),
            ChatstatsError::Schema { .. } => "Invalid Instagram data format".to_string(),
            ChatstatsError::InvalidInput { .. } => "Failed to process file".to_string(),
            ChatstatsError::EmptyConversation => "The conversation has no messages".to_string(),
            ChatstatsError::NoFile => "No file uploaded".to_string(),
            ChatstatsError::UnsupportedFile { .. } => "Only JSON files are allowed".to_string(),
            ChatstatsError::FileTooLarge { .. } => "File too large".to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
