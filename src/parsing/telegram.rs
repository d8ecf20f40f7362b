//! Shared Telegram export structures.
//!
//! The raw types mirror the subset of Telegram Desktop's `result.json` that
//! survives a conversion. The parser reads [`TelegramExport`]; the serializer
//! writes [`TelegramOutput`]. Unknown fields are ignored on input.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Message;
use crate::error::{ChatbridgeError, Result};
use crate::timestamp::{self, INSTANT_FORMAT};

/// Name of the format used in error messages.
pub const FORMAT_NAME: &str = "Telegram JSON";

/// Telegram export wrapper.
#[derive(Debug, Deserialize)]
pub struct TelegramExport {
    pub messages: Vec<TelegramRawMessage>,
}

/// Raw Telegram message structure for deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct TelegramRawMessage {
    /// ISO date string (or Unix seconds number in some third-party exports)
    pub date: Option<Value>,
    /// Unix timestamp, usually as a string
    pub date_unixtime: Option<Value>,
    /// Sender name
    pub from: Option<String>,
    /// Message text (string or mixed array)
    pub text: Option<Value>,
    /// Flattened text segments
    pub text_entities: Option<Vec<TextEntity>>,
    /// Relative path of an attached photo
    pub photo: Option<String>,
    /// Relative path of an attached file
    pub file: Option<String>,
}

/// One segment of a Telegram message text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextEntity {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl TextEntity {
    /// A `plain` entity wrapping `text`.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: "plain".to_string(),
            text: text.into(),
        }
    }
}

/// Top-level envelope written by the serializer.
#[derive(Debug, Serialize)]
pub struct TelegramOutput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub id: u64,
    pub messages: Vec<TelegramOutputMessage>,
}

/// One record in the serialized `messages` array.
#[derive(Debug, Serialize)]
pub struct TelegramOutputMessage {
    pub id: u64,
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub date: String,
    pub date_unixtime: String,
    pub from: String,
    pub from_id: String,
    pub text: String,
    pub text_entities: Vec<TextEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<&'static str>,
}

/// Extracts the message body.
///
/// `text_entities` wins when present; otherwise `text` is used, which can be
/// a plain string or an array of strings and `{"type", "text"}` objects.
pub fn extract_telegram_text(msg: &TelegramRawMessage) -> String {
    if let Some(entities) = &msg.text_entities {
        return entities.iter().map(|e| e.text.as_str()).collect();
    }

    match &msg.text {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj.get("text").and_then(|v| v.as_str()),
                _ => None,
            })
            .collect(),
        _ => String::new(),
    }
}

/// Resolves the message instant from `date`, falling back to `date_unixtime`.
pub fn extract_telegram_timestamp(msg: &TelegramRawMessage) -> Result<chrono::DateTime<chrono::Utc>> {
    match (&msg.date, &msg.date_unixtime) {
        (Some(date), _) if !date.is_null() => parse_date_value(date),
        (_, Some(unix)) if !unix.is_null() => parse_date_value(unix),
        _ => Err(ChatbridgeError::invalid_timestamp("<missing>", INSTANT_FORMAT)),
    }
}

fn parse_date_value(value: &Value) -> Result<chrono::DateTime<chrono::Utc>> {
    match value {
        Value::String(s) if s.trim().bytes().all(|b| b.is_ascii_digit()) && !s.trim().is_empty() => {
            timestamp::parse_unix_timestamp(s)
        }
        Value::String(s) => timestamp::parse_instant(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(timestamp::from_unix)
            .ok_or_else(|| ChatbridgeError::invalid_timestamp(n.to_string(), INSTANT_FORMAT)),
        other => Err(ChatbridgeError::invalid_timestamp(
            other.to_string(),
            INSTANT_FORMAT,
        )),
    }
}

/// Converts a raw Telegram record into a [`Message`].
///
/// `photo` and `file` become attachments in that order.
pub fn parse_telegram_message(msg: &TelegramRawMessage) -> Result<Message> {
    let timestamp = extract_telegram_timestamp(msg)?;
    let sender = msg.from.as_deref().unwrap_or_default();
    let attachments = [&msg.photo, &msg.file]
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>();

    Ok(Message::new(timestamp, sender, extract_telegram_text(msg)).with_attachments(attachments))
}
