//! Telegram JSON export writer.
//!
//! Produces a `result.json` shaped like Telegram Desktop's export. Fields with
//! no source counterpart (`from_id`, the chat `id`) are synthesized according
//! to the configured [`IdStrategy`].

use std::collections::BTreeSet;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng, thread_rng};
use tracing::{debug, warn};

use crate::Message;
use crate::config::{IdStrategy, TelegramConfig};
use crate::error::Result;
use crate::parsing::telegram::{TelegramOutput, TelegramOutputMessage, TextEntity};
use crate::platform::Platform;
use crate::serializer::Serializer;
use crate::timestamp::{format_instant, format_unix};

/// Synthetic ids are drawn from `0..ID_RANGE`.
const ID_RANGE: u64 = 1_000_000_000;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// How an attachment is represented in a Telegram record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Written to the `photo` field
    Photo,
    /// Written to `file` with `media_type: "video_file"`
    Video,
}

/// Classifies an attachment by its (case-sensitive) filename suffix.
///
/// Returns `None` for types Telegram output cannot carry.
///
/// ```rust
/// use chatbridge::serializers::{AttachmentKind, classify_attachment};
///
/// assert_eq!(classify_attachment("a.jpeg"), Some(AttachmentKind::Photo));
/// assert_eq!(classify_attachment("b.mp4"), Some(AttachmentKind::Video));
/// assert_eq!(classify_attachment("c.JPG"), None);
/// ```
pub fn classify_attachment(name: &str) -> Option<AttachmentKind> {
    if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        Some(AttachmentKind::Photo)
    } else if name.ends_with(".mp4") {
        Some(AttachmentKind::Video)
    } else {
        None
    }
}

/// Writer for Telegram JSON exports.
///
/// # Example
///
/// ```rust
/// use chatbridge::config::{IdStrategy, TelegramConfig};
/// use chatbridge::serializers::TelegramSerializer;
/// use chatbridge::serializer::Serializer;
/// use chatbridge::Message;
/// use chrono::{TimeZone, Utc};
///
/// let serializer = TelegramSerializer::with_config(
///     TelegramConfig::new().with_id_strategy(IdStrategy::Seeded(7)),
/// );
/// let msg = Message::new(Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap(), "Bob", "Hi");
/// let json = serializer.serialize(&[msg])?;
/// assert!(json.contains("\"date\": \"2023-01-01T10:00:00Z\""));
/// # Ok::<(), chatbridge::ChatbridgeError>(())
/// ```
pub struct TelegramSerializer {
    config: TelegramConfig,
}

impl TelegramSerializer {
    pub fn new() -> Self {
        Self {
            config: TelegramConfig::default(),
        }
    }

    pub fn with_config(config: TelegramConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    fn build_output(&self, messages: &[Message]) -> TelegramOutput {
        let mut ids = IdSource::new(self.config.id_strategy);

        let records = messages
            .iter()
            .zip(1u64..)
            .map(|(msg, id)| build_record(id, msg, &mut ids))
            .collect();

        TelegramOutput {
            name: None,
            chat_type: self.config.chat_type.clone(),
            id: ids.chat_id(messages),
            messages: records,
        }
    }
}

impl Default for TelegramSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for TelegramSerializer {
    fn name(&self) -> &'static str {
        "Telegram"
    }

    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    fn serialize(&self, messages: &[Message]) -> Result<String> {
        let output = self.build_output(messages);

        let json = if self.config.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };

        debug!(count = messages.len(), bytes = json.len(), "wrote Telegram export");
        Ok(json)
    }
}

fn build_record(id: u64, msg: &Message, ids: &mut IdSource) -> TelegramOutputMessage {
    let text_entities = if msg.text.is_empty() {
        Vec::new()
    } else {
        vec![TextEntity::plain(msg.text.clone())]
    };

    let mut record = TelegramOutputMessage {
        id,
        msg_type: "message",
        date: format_instant(&msg.timestamp),
        date_unixtime: format_unix(&msg.timestamp),
        from: msg.sender.clone(),
        from_id: format!("user{}", ids.user_id(&msg.sender)),
        text: msg.text.clone(),
        text_entities,
        photo: None,
        file: None,
        media_type: None,
    };

    for attachment in &msg.attachments {
        match classify_attachment(attachment) {
            Some(AttachmentKind::Photo) => record.photo = Some(attachment.clone()),
            Some(AttachmentKind::Video) => {
                record.file = Some(attachment.clone());
                record.media_type = Some("video_file");
            }
            None => warn!(
                message_id = id,
                attachment = %attachment,
                "unsupported attachment type, dropping"
            ),
        }
    }

    record
}

/// Produces `from_id` numbers and the chat id for one serialization run.
enum IdSource {
    Derived,
    Seeded(StdRng),
    Random(ThreadRng),
}

impl IdSource {
    fn new(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Derived => IdSource::Derived,
            IdStrategy::Seeded(seed) => IdSource::Seeded(StdRng::seed_from_u64(seed)),
            IdStrategy::Random => IdSource::Random(thread_rng()),
        }
    }

    fn user_id(&mut self, sender: &str) -> u64 {
        match self {
            IdSource::Derived => fnv1a(sender.bytes()) % ID_RANGE,
            IdSource::Seeded(rng) => rng.gen_range(0..ID_RANGE),
            IdSource::Random(rng) => rng.gen_range(0..ID_RANGE),
        }
    }

    fn chat_id(&mut self, messages: &[Message]) -> u64 {
        match self {
            IdSource::Derived => {
                let senders: BTreeSet<&str> = messages.iter().map(|m| m.sender.as_str()).collect();
                let bytes = senders
                    .into_iter()
                    .flat_map(|s| s.bytes().chain(std::iter::once(0)));
                fnv1a(bytes) % ID_RANGE
            }
            IdSource::Seeded(rng) => rng.gen_range(0..ID_RANGE),
            IdSource::Random(rng) => rng.gen_range(0..ID_RANGE),
        }
    }
}

/// 64-bit FNV-1a; stable across platforms and releases, unlike `DefaultHasher`.
fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    bytes.into_iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn msg(sender: &str, text: &str) -> Message {
        Message::new(Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 0).unwrap(), sender, text)
    }

    fn render(serializer: &TelegramSerializer, messages: &[Message]) -> Value {
        serde_json::from_str(&serializer.serialize(messages).unwrap()).unwrap()
    }

    #[test]
    fn test_record_shape() {
        let json = render(
            &TelegramSerializer::new(),
            &[msg("Alice", "Hello").with_attachment("photo.jpg")],
        );

        assert_eq!(json["name"], Value::Null);
        assert_eq!(json["type"], "personal_chat");
        assert!(json["id"].is_u64());

        let record = &json["messages"][0];
        assert_eq!(record["id"], 1);
        assert_eq!(record["type"], "message");
        assert_eq!(record["date"], "2024-03-05T09:15:00Z");
        assert_eq!(record["date_unixtime"], "1709630100");
        assert_eq!(record["from"], "Alice");
        assert!(record["from_id"].as_str().unwrap().starts_with("user"));
        assert_eq!(record["text"], "Hello");
        assert_eq!(
            record["text_entities"],
            serde_json::json!([{"type": "plain", "text": "Hello"}])
        );
        assert_eq!(record["photo"], "photo.jpg");
        assert!(record.get("file").is_none());
        assert!(record.get("media_type").is_none());
    }

    #[test]
    fn test_empty_text_has_no_entities() {
        let json = render(&TelegramSerializer::new(), &[msg("Bob", "")]);
        assert_eq!(json["messages"][0]["text_entities"], serde_json::json!([]));
    }

    #[test]
    fn test_video_and_unsupported_attachments() {
        let json = render(
            &TelegramSerializer::new(),
            &[msg("Bob", "").with_attachments(["clip.mp4", "video.mov"])],
        );
        let record = &json["messages"][0];
        assert_eq!(record["file"], "clip.mp4");
        assert_eq!(record["media_type"], "video_file");
        assert!(record.get("photo").is_none());
    }

    #[test]
    fn test_last_attachment_wins_per_field() {
        let json = render(
            &TelegramSerializer::new(),
            &[msg("Bob", "").with_attachments(["a.jpg", "b.jpeg"])],
        );
        assert_eq!(json["messages"][0]["photo"], "b.jpeg");
    }

    #[test]
    fn test_derived_ids_are_stable_per_sender() {
        let messages = [msg("Alice", "1"), msg("Bob", "2"), msg("Alice", "3")];
        let first = render(&TelegramSerializer::new(), &messages);
        let second = render(&TelegramSerializer::new(), &messages);

        assert_eq!(first, second);
        assert_eq!(first["messages"][0]["from_id"], first["messages"][2]["from_id"]);
        assert_ne!(first["messages"][0]["from_id"], first["messages"][1]["from_id"]);
    }

    #[test]
    fn test_derived_chat_id_ignores_sender_order() {
        let a = render(&TelegramSerializer::new(), &[msg("Alice", "x"), msg("Bob", "y")]);
        let b = render(&TelegramSerializer::new(), &[msg("Bob", "y"), msg("Alice", "x")]);
        assert_eq!(a["id"], b["id"]);
    }

    #[test]
    fn test_seeded_ids_are_reproducible() {
        let config = TelegramConfig::new().with_id_strategy(IdStrategy::Seeded(42));
        let messages = [msg("Alice", "1"), msg("Bob", "2")];

        let first = TelegramSerializer::with_config(config.clone())
            .serialize(&messages)
            .unwrap();
        let second = TelegramSerializer::with_config(config).serialize(&messages).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ids_stay_in_range() {
        for strategy in [IdStrategy::Derived, IdStrategy::Seeded(1), IdStrategy::Random] {
            let mut ids = IdSource::new(strategy);
            assert!(ids.user_id("Alice") < ID_RANGE);
            assert!(ids.chat_id(&[msg("Alice", "")]) < ID_RANGE);
        }
    }

    #[test]
    fn test_compact_output() {
        let serializer = TelegramSerializer::with_config(TelegramConfig::new().with_pretty(false));
        let json = serializer.serialize(&[msg("Bob", "Hi")]).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_pretty_output_uses_two_spaces() {
        let json = TelegramSerializer::new().serialize(&[]).unwrap();
        assert!(json.contains("\n  \"type\": \"personal_chat\""));
    }

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a(std::iter::empty()), FNV_OFFSET);
        assert_eq!(fnv1a("a".bytes()), 0xaf63_dc4c_8601_ec8c);
    }
}
