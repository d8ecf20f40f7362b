//! Parser trait for chat exports.
//!
//! A parser turns one platform's raw export into an ordered sequence of
//! [`Message`]s. Parsers know nothing about serializers or other platforms.
//!
//! # Example
//!
//! ```rust
//! use chatbridge::parser::Parser;
//! use chatbridge::parsers::WhatsAppParser;
//!
//! let parser = WhatsAppParser::new();
//! let messages = parser.parse_str("[5/3/24, 09:15:00] Alice: Hello\n")?;
//! assert_eq!(messages[0].sender, "Alice");
//! # Ok::<(), chatbridge::ChatbridgeError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::Message;
use crate::error::Result;
use crate::platform::Platform;

/// Unified trait for parsing chat exports.
///
/// Implementors provide [`name`](Parser::name), [`platform`](Parser::platform)
/// and [`parse_str`](Parser::parse_str); file loading and export recognition
/// have default implementations.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the platform this parser handles.
    fn platform(&self) -> Platform;

    /// Parses chat content from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatbridgeError::InvalidTimestamp`](crate::ChatbridgeError::InvalidTimestamp)
    /// or [`ChatbridgeError::MalformedSource`](crate::ChatbridgeError::MalformedSource)
    /// if the content cannot be parsed.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Parses a chat export file.
    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Returns `false` if `content` is clearly not an export of this
    /// platform, even though parsing it would not fail.
    fn is_recognized(&self, _content: &str) -> bool {
        true
    }
}

/// Creates a parser for the specified platform.
///
/// ```rust
/// use chatbridge::parser::create_parser;
/// use chatbridge::Platform;
///
/// let parser = create_parser(Platform::Telegram);
/// assert_eq!(parser.name(), "Telegram");
/// ```
pub fn create_parser(platform: Platform) -> Box<dyn Parser> {
    platform.parser()
}
