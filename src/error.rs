//! Unified error types for chatbridge.
//!
//! Every fallible operation in the crate returns [`ChatbridgeError`]. A
//! conversion is all-or-nothing: the first fatal error aborts it and no
//! partial output is produced.
//!
//! Conditions that are *not* errors (an attachment marker with no message to
//! attach to, an attachment the destination format cannot represent) are
//! reported through `tracing` warnings and skipped.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatbridge operations.
///
/// # Example
///
/// ```rust
/// use chatbridge::error::Result;
/// use chatbridge::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatbridgeError>;

/// The error type for all chatbridge operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatbridgeError {
    /// An I/O error occurred while reading or writing an export.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No archive entry looks like a chat file for the source platform.
    #[error("Chat file not found: expected a {platform} export entry ending with '{expected_suffix}'")]
    ChatFileNotFound {
        /// Display name of the source platform
        platform: String,
        /// File name suffix the chat entry must have
        expected_suffix: &'static str,
    },

    /// The requested (source, destination) pair cannot be converted.
    ///
    /// Raised for identical platforms and for unrecognized platform names.
    #[error("Unsupported conversion: {from} -> {to}")]
    UnsupportedConversion {
        /// Source platform as requested
        from: String,
        /// Destination platform as requested
        to: String,
    },

    /// A timestamp could not be parsed or does not name a real date/time.
    #[error("Invalid timestamp '{input}'. Expected format: {expected}")]
    InvalidTimestamp {
        /// The offending timestamp text
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The source export does not match its format's schema.
    #[error("Malformed {format} export: {source}")]
    MalformedSource {
        /// The format being parsed (e.g., "Telegram JSON")
        format: &'static str,
        /// What went wrong
        #[source]
        source: ParseErrorKind,
    },

    /// JSON serialization error while writing output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The chat entry of an archive is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of source-format violations.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The document is not valid JSON or has the wrong shape
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The document is valid but violates the export schema
    #[error("{0}")]
    Schema(String),
}

impl From<std::string::FromUtf8Error> for ChatbridgeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatbridgeError::Utf8 {
            context: "chat file".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatbridgeError {
    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>, expected: &'static str) -> Self {
        ChatbridgeError::InvalidTimestamp {
            input: input.into(),
            expected,
        }
    }

    /// Creates a malformed-source error from a JSON decoding failure.
    pub fn malformed_json(format: &'static str, source: serde_json::Error) -> Self {
        ChatbridgeError::MalformedSource {
            format,
            source: ParseErrorKind::Json(source),
        }
    }

    /// Creates a malformed-source error from a schema violation.
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        ChatbridgeError::MalformedSource {
            format,
            source: ParseErrorKind::Schema(message.into()),
        }
    }

    /// Creates a chat-file-not-found error.
    pub fn chat_file_not_found(platform: impl Into<String>, expected_suffix: &'static str) -> Self {
        ChatbridgeError::ChatFileNotFound {
            platform: platform.into(),
            expected_suffix,
        }
    }

    /// Creates an unsupported conversion error.
    pub fn unsupported_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        ChatbridgeError::UnsupportedConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatbridgeError::Io(_))
    }

    /// Returns `true` if no chat entry was found.
    pub fn is_chat_file_not_found(&self) -> bool {
        matches!(self, ChatbridgeError::ChatFileNotFound { .. })
    }

    /// Returns `true` if the platform pair was rejected.
    pub fn is_unsupported_conversion(&self) -> bool {
        matches!(self, ChatbridgeError::UnsupportedConversion { .. })
    }

    /// Returns `true` if a timestamp failed to parse.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, ChatbridgeError::InvalidTimestamp { .. })
    }

    /// Returns `true` if the source export violated its schema.
    pub fn is_malformed_source(&self) -> bool {
        matches!(self, ChatbridgeError::MalformedSource { .. })
    }
}
