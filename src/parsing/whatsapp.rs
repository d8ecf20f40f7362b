//! Shared WhatsApp line grammar.
//!
//! Both the parser and the serializer work with the same two line shapes:
//!
//! - message start: `[5/3/24, 09:15:00] Alice: Hello`
//! - attachment marker: `\u{200E}<attached: photo.jpg>`
//!
//! Keeping the grammar here means the serializer can only emit lines the
//! parser recognizes.

use std::sync::LazyLock;

use regex::Regex;

/// Left-to-right mark WhatsApp puts in front of attachment markers.
pub const LTR_MARK: char = '\u{200E}';

/// Prefix that identifies an attachment marker line.
pub const ATTACHMENT_PREFIX: &str = "\u{200E}<attached: ";

/// `[D/M/Y, H:M:S] Sender: Text`; the sender ends at the first `": "`.
static MESSAGE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2}:\d{2})\] (.*?): (.*)$")
        .expect("message start pattern is valid")
});

static ATTACHMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{200E}<attached: (.*?)>").expect("attachment pattern is valid")
});

/// Fields captured from a message-start line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStart<'a> {
    /// `D/M/Y` date field
    pub date: &'a str,
    /// `H:M:S` time field
    pub time: &'a str,
    /// Everything before the first `": "`
    pub sender: &'a str,
    /// Everything after it
    pub text: &'a str,
}

/// Classification of a single export line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhatsAppLine<'a> {
    /// Opens a new message.
    MessageStart(MessageStart<'a>),
    /// Attaches a file to the open message.
    Attachment(&'a str),
    /// Looks like an attachment marker but has no closing `>`.
    BrokenAttachment,
    /// Continuation text or boilerplate.
    Text,
}

/// Classifies one line of a WhatsApp export.
///
/// Message starts take precedence over attachment markers, which take
/// precedence over plain text.
pub fn classify_line(line: &str) -> WhatsAppLine<'_> {
    if let Some(caps) = MESSAGE_START.captures(line) {
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        return WhatsAppLine::MessageStart(MessageStart {
            date: field(1),
            time: field(2),
            sender: field(3),
            text: field(4),
        });
    }

    if line.contains(ATTACHMENT_PREFIX) {
        return match ATTACHMENT.captures(line).and_then(|caps| caps.get(1)) {
            Some(name) => WhatsAppLine::Attachment(name.as_str()),
            None => WhatsAppLine::BrokenAttachment,
        };
    }

    WhatsAppLine::Text
}

/// Returns `true` if `line` opens a new message.
pub fn is_message_start(line: &str) -> bool {
    MESSAGE_START.is_match(line)
}

/// Builds a message-start line (without the trailing newline).
pub fn format_message_line(date: &str, time: &str, sender: &str, text: &str) -> String {
    format!("[{date}, {time}] {sender}: {text}")
}

/// Builds an attachment marker line (without the trailing newline).
pub fn format_attachment_line(name: &str) -> String {
    format!("{ATTACHMENT_PREFIX}{name}>")
}
