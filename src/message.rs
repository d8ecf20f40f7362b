//! Canonical message type shared by every parser and serializer.
//!
//! Parsers turn a platform export into an ordered `Vec<Message>`; serializers
//! turn that sequence back into the other platform's export. The sequence is
//! never re-sorted: its order is the order of appearance in the source.
//!
//! # Example
//!
//! ```
//! use chatbridge::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Hello").with_attachment("photo.jpg");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.attachments(), ["photo.jpg"]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when a source export has no sender for a message.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// A platform-neutral chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | When the message was sent, second precision |
/// | `sender` | `String` | Display name, never empty (see [`UNKNOWN_SENDER`]) |
/// | `text` | `String` | Message body; multi-line bodies are joined with `\n` |
/// | `attachments` | `Vec<String>` | Attachment file names or media ids, source order |
///
/// Timestamps carry no timezone information from the source: the wall-clock
/// fields of an export are stored as that literal UTC instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MessageRecord")]
pub struct Message {
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Display name of the author.
    pub sender: String,

    /// Text body of the message.
    pub text: String,

    /// Attachment references in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

/// Deserialization shape of [`Message`], routed through [`Message::new`].
#[derive(Deserialize)]
struct MessageRecord {
    timestamp: DateTime<Utc>,
    #[serde(default)]
    sender: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attachments: Vec<String>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Message::new(record.timestamp, record.sender, record.text).with_attachments(record.attachments)
    }
}

impl Message {
    /// Creates a message without attachments.
    ///
    /// An empty or whitespace-only `sender` is replaced with [`UNKNOWN_SENDER`].
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: normalize_sender(sender.into()),
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Builder method to append one attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, name: impl Into<String>) -> Self {
        self.attachments.push(name.into());
        self
    }

    /// Builder method to replace all attachment references.
    #[must_use]
    pub fn with_attachments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachments = names.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the attachment references.
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// Returns `true` if the message references at least one attachment.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Appends a continuation line to the body.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }
}

fn normalize_sender(sender: String) -> String {
    if sender.trim().is_empty() {
        UNKNOWN_SENDER.to_string()
    } else {
        sender
    }
}
