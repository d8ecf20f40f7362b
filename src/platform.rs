//! The closed set of supported messaging platforms.
//!
//! Every platform contributes exactly one parser and one serializer; adding a
//! platform means adding a variant here plus those two units.
//!
//! # Example
//!
//! ```rust
//! use chatbridge::Platform;
//! use std::str::FromStr;
//!
//! let platform = Platform::from_str("wa").unwrap();
//! assert_eq!(platform, Platform::WhatsApp);
//! assert_eq!(platform.chat_file_name(), "_chat.txt");
//! assert_eq!(platform.parser().name(), "WhatsApp");
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConvertConfig;
use crate::parser::Parser;
use crate::parsers::{TelegramParser, WhatsAppParser};
use crate::serializer::Serializer;
use crate::serializers::{TelegramSerializer, WhatsAppSerializer};

/// Supported messaging platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// WhatsApp `_chat.txt` text export
    #[serde(alias = "wa")]
    #[cfg_attr(feature = "cli", value(name = "whatsapp", alias = "wa"))]
    WhatsApp,

    /// Telegram Desktop `result.json` export
    #[serde(alias = "tg")]
    #[cfg_attr(feature = "cli", value(name = "telegram", alias = "tg"))]
    Telegram,
}

impl Platform {
    /// Lowercase name used in file names and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::WhatsApp => "whatsapp",
            Platform::Telegram => "telegram",
        }
    }

    /// Name of the chat entry inside an export archive.
    ///
    /// Source archives are searched for an entry whose name *ends with* this
    /// string; converted archives store the chat under exactly this name.
    pub fn chat_file_name(&self) -> &'static str {
        match self {
            Platform::WhatsApp => "_chat.txt",
            Platform::Telegram => "result.json",
        }
    }

    /// Returns all platform names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["whatsapp", "wa", "telegram", "tg"]
    }

    /// Returns all available platforms.
    pub fn all() -> &'static [Platform] {
        &[Platform::WhatsApp, Platform::Telegram]
    }

    /// Creates the parser for this platform's exports.
    pub fn parser(&self) -> Box<dyn Parser> {
        match self {
            Platform::WhatsApp => Box::new(WhatsAppParser::new()),
            Platform::Telegram => Box::new(TelegramParser::new()),
        }
    }

    /// Creates the serializer that writes this platform's exports.
    pub fn serializer(&self, config: &ConvertConfig) -> Box<dyn Serializer> {
        match self {
            Platform::WhatsApp => Box::new(WhatsAppSerializer::new()),
            Platform::Telegram => Box::new(TelegramSerializer::with_config(config.telegram.clone())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::WhatsApp => write!(f, "WhatsApp"),
            Platform::Telegram => write!(f, "Telegram"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(Platform::WhatsApp),
            "telegram" | "tg" => Ok(Platform::Telegram),
            _ => Err(format!(
                "Unknown platform: '{}'. Expected one of: {}",
                s,
                Platform::all_names().join(", ")
            )),
        }
    }
}
