//! # Chatbridge
//!
//! A Rust library for converting chat exports between messaging platforms
//! without losing messages, senders, timestamps or attachments.
//!
//! ## Overview
//!
//! Chatbridge reads and writes:
//! - **WhatsApp** — `_chat.txt` text exports (`[d/m/yy, HH:MM:SS] Sender: text`)
//! - **Telegram** — `result.json` exports from Telegram Desktop
//!
//! Every export is parsed into a platform-neutral [`Message`] sequence and
//! serialized again for the destination platform. Whole exports (chat file
//! plus media) are handled by the [`archive`] layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatbridge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let whatsapp = "[5/3/24, 09:15:00] Alice: Hello\n\u{200E}<attached: photo.jpg>\n";
//!
//!     let output = convert(Platform::WhatsApp, Platform::Telegram, whatsapp)?;
//!     assert_eq!(output.chat_file_name, "result.json");
//!     assert_eq!(output.message_count, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Reproducible Output
//!
//! Telegram exports carry numeric ids that WhatsApp exports lack. By default
//! they are derived from sender names, so the same input always gives the
//! same output. See [`config::IdStrategy`] for seeded or random ids:
//!
//! ```rust
//! use chatbridge::prelude::*;
//!
//! let converter = Converter::with_config(
//!     ConvertConfig::new()
//!         .with_telegram(TelegramConfig::new().with_id_strategy(IdStrategy::Seeded(42))),
//! );
//! let output = converter.convert(Platform::WhatsApp, Platform::Telegram, "")?;
//! assert_eq!(output.message_count, 0);
//! # Ok::<(), chatbridge::ChatbridgeError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`message`] — [`Message`], the platform-neutral chat message
//! - [`platform`] — [`Platform`], the closed set of supported platforms
//! - [`parser`] / [`parsers`] — [`Parser`](parser::Parser) trait and implementations
//! - [`serializer`] / [`serializers`] — [`Serializer`](serializer::Serializer) trait and implementations
//! - [`parsing`] — line patterns and record types shared by both directions
//! - [`timestamp`] — calendar validation and timestamp formats
//! - [`convert`] — [`Converter`], the conversion orchestrator
//! - [`archive`] — [`ExportArchive`], whole-export conversion
//! - [`config`] — [`ConvertConfig`](config::ConvertConfig) and friends
//! - [`error`] — [`ChatbridgeError`], [`Result`]
//! - [`prelude`] — Convenient re-exports

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod platform;
pub mod serializer;
pub mod serializers;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use archive::{ExportArchive, ExportEntry, convert_archive};
pub use convert::{ConversionOutput, Converter, convert};
pub use error::{ChatbridgeError, Result};
pub use message::Message;
pub use platform::Platform;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatbridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatbridgeError, Result};

    pub use crate::platform::Platform;

    pub use crate::parser::{Parser, create_parser};
    pub use crate::serializer::{Serializer, create_serializer};

    pub use crate::config::{ConvertConfig, IdStrategy, TelegramConfig};

    pub use crate::convert::{ConversionOutput, Converter, convert};

    pub use crate::archive::{ExportArchive, ExportEntry, convert_archive};

    pub use crate::parsers::{TelegramParser, WhatsAppParser};
    pub use crate::serializers::{TelegramSerializer, WhatsAppSerializer};
}
