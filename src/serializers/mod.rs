//! Chat export serializers.
//!
//! - [`WhatsAppSerializer`] - Writes WhatsApp `_chat.txt` exports
//! - [`TelegramSerializer`] - Writes Telegram `result.json` exports

mod telegram;
mod whatsapp;

pub use telegram::{AttachmentKind, TelegramSerializer, classify_attachment};
pub use whatsapp::WhatsAppSerializer;
