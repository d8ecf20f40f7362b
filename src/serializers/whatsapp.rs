//! WhatsApp TXT export writer.

use tracing::debug;

use crate::Message;
use crate::error::Result;
use crate::parsing::whatsapp::{format_attachment_line, format_message_line};
use crate::platform::Platform;
use crate::serializer::Serializer;
use crate::timestamp::to_local_fields;

/// Writes messages in the bracketed `_chat.txt` layout.
///
/// Embedded newlines in a message body are written as-is, so they read back
/// as continuation lines of the same message.
///
/// ```rust
/// use chatbridge::serializers::WhatsAppSerializer;
/// use chatbridge::serializer::Serializer;
/// use chatbridge::Message;
/// use chrono::{TimeZone, Utc};
///
/// let msg = Message::new(Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 0).unwrap(), "Alice", "Hello")
///     .with_attachment("photo.jpg");
/// let text = WhatsAppSerializer::new().serialize(&[msg])?;
/// assert_eq!(text, "[5/3/24, 09:15:00] Alice: Hello\n\u{200E}<attached: photo.jpg>\n");
/// # Ok::<(), chatbridge::ChatbridgeError>(())
/// ```
pub struct WhatsAppSerializer;

impl WhatsAppSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WhatsAppSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for WhatsAppSerializer {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn platform(&self) -> Platform {
        Platform::WhatsApp
    }

    fn serialize(&self, messages: &[Message]) -> Result<String> {
        let mut output = String::new();

        for msg in messages {
            let (date, time) = to_local_fields(&msg.timestamp);
            output.push_str(&format_message_line(&date, &time, &msg.sender, &msg.text));
            output.push('\n');

            for attachment in &msg.attachments {
                output.push_str(&format_attachment_line(attachment));
                output.push('\n');
            }
        }

        debug!(count = messages.len(), bytes = output.len(), "wrote WhatsApp export");
        Ok(output)
    }
}
