//! Shared line and record helpers for both directions of a conversion.
//!
//! Parsers use these to read exports; serializers use the same patterns and
//! record types to write them, so the two sides cannot drift apart.

pub mod telegram;
pub mod whatsapp;

pub use telegram::{
    TelegramExport, TelegramOutput, TelegramOutputMessage, TelegramRawMessage, TextEntity,
    extract_telegram_text, extract_telegram_timestamp, parse_telegram_message,
};
pub use whatsapp::{
    MessageStart, WhatsAppLine, classify_line, format_attachment_line, format_message_line,
    is_message_start,
};
