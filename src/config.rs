//! Configuration types for serializers and the converter.
//!
//! Only the Telegram side has knobs: its JSON export carries synthetic ids
//! that have no counterpart in a WhatsApp export, and the way those ids are
//! produced decides whether conversions are reproducible.
//!
//! # Example
//!
//! ```rust
//! use chatbridge::config::{ConvertConfig, IdStrategy, TelegramConfig};
//!
//! let config = ConvertConfig::new().with_telegram(
//!     TelegramConfig::new()
//!         .with_id_strategy(IdStrategy::Seeded(42))
//!         .with_pretty(false),
//! );
//! assert_eq!(config.telegram.id_strategy, IdStrategy::Seeded(42));
//! ```

use serde::{Deserialize, Serialize};

/// How synthetic Telegram ids (`from_id`, chat `id`) are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Derived from sender names: the same sender always gets the same
    /// `from_id`, and the chat id depends only on the set of senders.
    #[default]
    Derived,

    /// Random ids from a generator seeded with this value.
    Seeded(u64),

    /// Random ids from the thread-local generator (not reproducible).
    Random,
}

/// Configuration for Telegram JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Synthetic id generation (default: [`IdStrategy::Derived`])
    pub id_strategy: IdStrategy,

    /// Pretty-print with 2-space indentation (default: true)
    pub pretty: bool,

    /// Envelope `type` field (default: "personal_chat")
    pub chat_type: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Derived,
            pretty: true,
            chat_type: "personal_chat".to_string(),
        }
    }
}

impl TelegramConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how synthetic ids are generated.
    #[must_use]
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Enables or disables pretty-printing.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the envelope `type` field.
    #[must_use]
    pub fn with_chat_type(mut self, chat_type: impl Into<String>) -> Self {
        self.chat_type = chat_type.into();
        self
    }
}

/// Configuration for a whole conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Settings used when the destination is Telegram
    pub telegram: TelegramConfig,
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the Telegram output settings.
    #[must_use]
    pub fn with_telegram(mut self, telegram: TelegramConfig) -> Self {
        self.telegram = telegram;
        self
    }
}
