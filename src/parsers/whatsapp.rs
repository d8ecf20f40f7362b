//! `WhatsApp` TXT export parser.
//!
//! Reads the iOS-style bracketed export:
//!
//! ```text
//! [5/3/24, 09:15:00] Alice: Hello
//! and a second line
//! ‎<attached: 00000012-PHOTO-2024-03-05.jpg>
//! ```
//!
//! Lines without a timestamp prefix continue the previous message; attachment
//! markers attach to it.

use tracing::{debug, info, warn};

use crate::Message;
use crate::error::Result;
use crate::parser::Parser;
use crate::parsing::whatsapp::{WhatsAppLine, classify_line, is_message_start};
use crate::platform::Platform;
use crate::timestamp::parse_local_timestamp;

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatbridge::parsers::WhatsAppParser;
/// use chatbridge::parser::Parser;
///
/// let chat = "[5/3/24, 09:15:00] Alice: line1\nline2\n";
/// let messages = WhatsAppParser::new().parse_str(chat)?;
/// assert_eq!(messages[0].text, "line1\nline2");
/// # Ok::<(), chatbridge::ChatbridgeError>(())
/// ```
pub struct WhatsAppParser;

impl WhatsAppParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_content(&self, content: &str) -> Result<Vec<Message>> {
        debug!(bytes = content.len(), "parsing WhatsApp export");

        let mut messages: Vec<Message> = Vec::new();
        let mut current: Option<Message> = None;

        for (index, line) in content.lines().enumerate() {
            match classify_line(line) {
                WhatsAppLine::MessageStart(start) => {
                    let timestamp = parse_local_timestamp(start.date, start.time)?;
                    let next = Message::new(timestamp, start.sender, start.text);
                    messages.extend(current.replace(next));
                }
                WhatsAppLine::Attachment(name) => match current.as_mut() {
                    Some(msg) => msg.attachments.push(name.to_string()),
                    None => warn!(
                        line = index + 1,
                        attachment = name,
                        "attachment marker before the first message, skipping"
                    ),
                },
                WhatsAppLine::BrokenAttachment => {
                    warn!(line = index + 1, "unterminated attachment marker, skipping");
                }
                WhatsAppLine::Text => {
                    // Orphan lines before the first message are export boilerplate
                    if let Some(msg) = current.as_mut() {
                        msg.push_line(line.trim_end());
                    }
                }
            }
        }

        messages.extend(current);

        info!(count = messages.len(), "parsed WhatsApp export");
        Ok(messages)
    }
}

impl Default for WhatsAppParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn platform(&self) -> Platform {
        Platform::WhatsApp
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        self.parse_content(content)
    }

    /// Blank files are an empty chat; anything else needs a message line.
    fn is_recognized(&self, content: &str) -> bool {
        content.trim().is_empty() || content.lines().any(is_message_start)
    }
}
