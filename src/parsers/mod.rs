//! Chat export parsers.
//!
//! - [`WhatsAppParser`] - Parses WhatsApp `_chat.txt` exports
//! - [`TelegramParser`] - Parses Telegram `result.json` exports
//!
//! # Example
//!
//! ```rust
//! use chatbridge::parser::{Parser, create_parser};
//! use chatbridge::Platform;
//!
//! let parser = create_parser(Platform::Telegram);
//! let messages = parser.parse_str(r#"{"messages": []}"#)?;
//! assert!(messages.is_empty());
//! # Ok::<(), chatbridge::ChatbridgeError>(())
//! ```

mod telegram;
mod whatsapp;

pub use telegram::TelegramParser;
pub use whatsapp::WhatsAppParser;
