//! Serializer trait for chat exports.
//!
//! The mirror image of [`Parser`](crate::parser::Parser): a serializer writes
//! a sequence of [`Message`]s in one platform's native export format.

use std::fs;
use std::path::Path;

use crate::Message;
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::platform::Platform;

/// Unified trait for writing chat exports.
pub trait Serializer: Send + Sync {
    /// Returns the human-readable name of this serializer.
    fn name(&self) -> &'static str;

    /// Returns the platform whose format this serializer writes.
    fn platform(&self) -> Platform;

    /// Renders messages as the full text of the platform's chat file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatbridgeError::Json`](crate::ChatbridgeError::Json) if
    /// JSON encoding fails.
    fn serialize(&self, messages: &[Message]) -> Result<String>;

    /// Renders messages and writes them to `path`.
    fn write(&self, messages: &[Message], path: &Path) -> Result<()> {
        let payload = self.serialize(messages)?;
        fs::write(path, payload)?;
        Ok(())
    }
}

/// Creates a serializer for the specified platform.
///
/// ```rust
/// use chatbridge::config::ConvertConfig;
/// use chatbridge::serializer::create_serializer;
/// use chatbridge::Platform;
///
/// let serializer = create_serializer(Platform::WhatsApp, &ConvertConfig::default());
/// assert_eq!(serializer.serialize(&[])?, "");
/// # Ok::<(), chatbridge::ChatbridgeError>(())
/// ```
pub fn create_serializer(platform: Platform, config: &ConvertConfig) -> Box<dyn Serializer> {
    platform.serializer(config)
}
