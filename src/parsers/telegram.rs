//! Telegram JSON export parser.

use tracing::{debug, info};

use crate::Message;
use crate::error::{ChatbridgeError, Result};
use crate::parser::Parser;
use crate::parsing::telegram::{FORMAT_NAME, TelegramExport, parse_telegram_message};
use crate::platform::Platform;

/// Parser for Telegram JSON exports.
///
/// Telegram exports chats as JSON with the following structure:
/// ```json
/// {
///   "name": "Chat Name",
///   "messages": [
///     {
///       "id": 12345,
///       "type": "message",
///       "date": "2024-01-15T10:30:00",
///       "date_unixtime": "1705314600",
///       "from": "Sender Name",
///       "text": "Hello" | ["Hello", {"type": "link", "text": "url"}],
///       "text_entities": [{"type": "plain", "text": "Hello"}],
///       "photo": "photos/photo_1.jpg"
///     }
///   ]
/// }
/// ```
///
/// Every entry of `messages` becomes a [`Message`], service entries included.
pub struct TelegramParser;

impl TelegramParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TelegramParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for TelegramParser {
    fn name(&self) -> &'static str {
        "Telegram"
    }

    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        debug!(bytes = content.len(), "parsing Telegram export");

        let export: TelegramExport = serde_json::from_str(content)
            .map_err(|e| ChatbridgeError::malformed_json(FORMAT_NAME, e))?;

        let messages = export
            .messages
            .iter()
            .map(parse_telegram_message)
            .collect::<Result<Vec<_>>>()?;

        info!(count = messages.len(), "parsed Telegram export");
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_name() {
        let parser = TelegramParser::new();
        assert_eq!(parser.name(), "Telegram");
        assert_eq!(parser.platform(), Platform::Telegram);
    }

    #[test]
    fn test_parse_basic_export() {
        let json = r#"{
            "name": "Bob",
            "type": "personal_chat",
            "id": 1,
            "messages": [
                {"id": 1, "type": "message", "date": "2023-01-01T10:00:00", "from": "Bob", "text": "Hi"},
                {"id": 2, "type": "message", "date": "2023-01-01T10:01:00", "from": "Alice",
                 "text": "", "photo": "photos/photo_1.jpg"}
            ]
        }"#;
        let messages = TelegramParser::new().parse_str(json).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Bob");
        assert!(messages[0].attachments.is_empty());
        assert_eq!(messages[1].attachments, vec!["photos/photo_1.jpg"]);
    }

    #[test]
    fn test_service_messages_are_kept() {
        let json = r#"{"messages": [
            {"id": 1, "type": "service", "date": "2023-01-01T10:00:00", "actor": "Bob", "action": "pin_message", "text": ""}
        ]}"#;
        let messages = TelegramParser::new().parse_str(json).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Unknown");
    }

    #[test]
    fn test_empty_messages_array() {
        let messages = TelegramParser::new().parse_str(r#"{"messages": []}"#).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = TelegramParser::new().parse_str("{not json").unwrap_err();
        assert!(err.is_malformed_source());
    }

    #[test]
    fn test_missing_messages_array() {
        let err = TelegramParser::new()
            .parse_str(r#"{"name": "chat"}"#)
            .unwrap_err();
        assert!(err.is_malformed_source());
        assert!(err.to_string().contains("Telegram JSON"));
    }

    #[test]
    fn test_messages_not_objects() {
        let err = TelegramParser::new()
            .parse_str(r#"{"messages": [1, 2]}"#)
            .unwrap_err();
        assert!(err.is_malformed_source());
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let err = TelegramParser::new()
            .parse_str(r#"{"messages": [{"date": "2023-02-30T10:00:00", "from": "Bob", "text": "x"}]}"#)
            .unwrap_err();
        assert!(err.is_invalid_timestamp());
    }
}
