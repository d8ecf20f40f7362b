//! Conversion orchestrator.
//!
//! Validates the platform pair, parses the source chat into [`Message`]s and
//! serializes them for the destination. Archive-level conversion (chat file
//! lookup plus pass-through of media) lives in [`crate::archive`].
//!
//! # Example
//!
//! ```rust
//! use chatbridge::{Platform, convert};
//!
//! let raw = r#"{"messages": [{"date": "2023-01-01T10:00:00", "from": "Bob", "text": "Hi"}]}"#;
//! let output = convert(Platform::Telegram, Platform::WhatsApp, raw)?;
//!
//! assert_eq!(output.payload, "[1/1/23, 10:00:00] Bob: Hi\n");
//! assert_eq!(output.chat_file_name, "_chat.txt");
//! assert_eq!(output.archive_name, "converted_chat_whatsapp.zip");
//! # Ok::<(), chatbridge::ChatbridgeError>(())
//! ```

use tracing::{debug, info};

use crate::Message;
use crate::config::ConvertConfig;
use crate::error::{ChatbridgeError, Result};
use crate::platform::Platform;

/// Result of converting one chat file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// Full text of the destination chat file
    pub payload: String,
    /// Name the destination chat file should be stored under
    pub chat_file_name: &'static str,
    /// Conventional name of the output archive
    pub archive_name: String,
    /// Number of messages carried over
    pub message_count: usize,
}

/// Base name for conversion outputs, e.g. `converted_chat_telegram`.
pub fn output_stem(dest: Platform) -> String {
    format!("converted_chat_{}", dest.slug())
}

/// File name of the converted archive, e.g. `converted_chat_telegram.zip`.
pub fn archive_name(dest: Platform) -> String {
    format!("{}.zip", output_stem(dest))
}

/// Converts chat exports between platforms.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Converts the text of a `source` chat file into a `dest` chat file.
    ///
    /// # Errors
    ///
    /// - [`ChatbridgeError::UnsupportedConversion`] if `source == dest`
    /// - [`ChatbridgeError::ChatFileNotFound`] if the text is not a `source` export
    /// - any parse error of the source format
    pub fn convert(&self, source: Platform, dest: Platform, raw: &str) -> Result<ConversionOutput> {
        check_pair(source, dest)?;

        let messages = self.parse(source, raw)?;
        let payload = dest.serializer(&self.config).serialize(&messages)?;

        info!(
            from = %source,
            to = %dest,
            messages = messages.len(),
            "converted chat"
        );

        Ok(ConversionOutput {
            payload,
            chat_file_name: dest.chat_file_name(),
            archive_name: archive_name(dest),
            message_count: messages.len(),
        })
    }

    /// Like [`convert`](Self::convert), with platforms given by name or alias.
    ///
    /// Unknown names are reported as [`ChatbridgeError::UnsupportedConversion`].
    pub fn convert_named(&self, source: &str, dest: &str, raw: &str) -> Result<ConversionOutput> {
        match (source.parse::<Platform>(), dest.parse::<Platform>()) {
            (Ok(from), Ok(to)) => self.convert(from, to, raw),
            _ => Err(ChatbridgeError::unsupported_conversion(source, dest)),
        }
    }

    /// Parses `raw` as a `source` export.
    pub fn parse(&self, source: Platform, raw: &str) -> Result<Vec<Message>> {
        let parser = source.parser();
        if !parser.is_recognized(raw) {
            return Err(ChatbridgeError::chat_file_not_found(
                source.to_string(),
                source.chat_file_name(),
            ));
        }

        let messages = parser.parse_str(raw)?;
        debug!(parser = parser.name(), count = messages.len(), "parsed source chat");
        Ok(messages)
    }
}

/// Rejects conversions that would not change the format.
pub(crate) fn check_pair(source: Platform, dest: Platform) -> Result<()> {
    if source == dest {
        return Err(ChatbridgeError::unsupported_conversion(
            source.slug(),
            dest.slug(),
        ));
    }
    Ok(())
}

/// Converts with the default configuration.
pub fn convert(source: Platform, dest: Platform, raw: &str) -> Result<ConversionOutput> {
    Converter::new().convert(source, dest, raw)
}
