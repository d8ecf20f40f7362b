//! Export archives: the chat file plus everything that travels with it.
//!
//! An [`ExportArchive`] is an ordered list of named blobs, the in-memory form
//! of an unpacked export (chat file, photos, videos, stickers). Converting an
//! archive replaces the chat file and passes every other entry through
//! untouched. With the `cli` feature, archives load from and store to
//! directories and `.zip` files.
//!
//! # Example
//!
//! ```rust
//! use chatbridge::{Converter, ExportArchive, Platform};
//!
//! let archive = ExportArchive::new()
//!     .with_entry("Chat/_chat.txt", "[5/3/24, 09:15:00] Alice: Hi\n")
//!     .with_entry("Chat/photo.jpg", vec![0xFFu8, 0xD8]);
//!
//! let converted = Converter::new().convert_archive(Platform::WhatsApp, Platform::Telegram, &archive)?;
//!
//! assert_eq!(converted.names(), vec!["result.json", "Chat/photo.jpg"]);
//! # Ok::<(), chatbridge::ChatbridgeError>(())
//! ```

use std::fs;
use std::io;
#[cfg(feature = "cli")]
use std::io::{Read, Seek, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::convert::{Converter, check_pair};
use crate::error::{ChatbridgeError, Result};
use crate::platform::Platform;

/// A named file inside an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    /// Path inside the archive, `/`-separated
    pub name: String,
    pub data: Vec<u8>,
}

impl ExportEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Ordered collection of export entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportArchive {
    entries: Vec<ExportEntry>,
}

impl ExportArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry (builder style).
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.push(ExportEntry::new(name, data));
        self
    }

    pub fn push(&mut self, entry: ExportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ExportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in archive order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Looks up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&ExportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Finds the chat file of a `platform` export.
    ///
    /// The first entry whose name ends with the platform's chat file name
    /// wins, so `WhatsApp Chat - Bob/_chat.txt` is found as well.
    ///
    /// # Errors
    ///
    /// Returns [`ChatbridgeError::ChatFileNotFound`] if no entry matches.
    pub fn locate_chat_entry(&self, platform: Platform) -> Result<&ExportEntry> {
        let suffix = platform.chat_file_name();
        self.entries
            .iter()
            .find(|e| e.name.ends_with(suffix))
            .ok_or_else(|| ChatbridgeError::chat_file_not_found(platform.to_string(), suffix))
    }

    /// Loads a single chat file as a one-entry archive.
    pub fn from_file(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = fs::read(path)?;
        Ok(Self::new().with_entry(name, data))
    }

    /// Loads every file below `root`, sorted by path.
    #[cfg(feature = "cli")]
    pub fn from_dir(root: &Path) -> Result<Self> {
        let mut archive = Self::new();

        for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            archive.push(ExportEntry::new(name, fs::read(entry.path())?));
        }

        debug!(root = %root.display(), entries = archive.len(), "loaded export directory");
        Ok(archive)
    }

    /// Loads every file of a `.zip` export, in archive order.
    #[cfg(feature = "cli")]
    pub fn from_zip(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let archive = Self::read_zip(io::BufReader::new(file))?;

        debug!(path = %path.display(), entries = archive.len(), "loaded export zip");
        Ok(archive)
    }

    /// Reads a zip archive from any seekable reader. Directory entries are
    /// skipped.
    #[cfg(feature = "cli")]
    pub fn read_zip<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = zip::ZipArchive::new(reader).map_err(io::Error::from)?;
        let mut archive = Self::new();

        for index in 0..zip.len() {
            let mut file = zip.by_index(index).map_err(io::Error::from)?;
            if file.is_dir() {
                continue;
            }

            let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
            file.read_to_end(&mut data)?;
            archive.push(ExportEntry::new(file.name(), data));
        }

        Ok(archive)
    }

    /// Writes the archive as a deflate-compressed `.zip` at `path`.
    ///
    /// # Errors
    ///
    /// Same name rules as [`write_to_dir`](Self::write_to_dir).
    #[cfg(feature = "cli")]
    pub fn write_zip(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(path)?;
        let mut writer = self.write_zip_to(io::BufWriter::new(file))?;
        writer.flush()?;

        debug!(path = %path.display(), entries = self.len(), "wrote export zip");
        Ok(())
    }

    /// Writes the archive as a zip into `writer` and hands it back.
    #[cfg(feature = "cli")]
    pub fn write_zip_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let mut zip = zip::ZipWriter::new(writer);

        for entry in &self.entries {
            check_entry_name(&entry.name)?;
            zip.start_file(entry.name.as_str(), options)
                .map_err(io::Error::from)?;
            zip.write_all(&entry.data)?;
        }

        let writer = zip.finish().map_err(io::Error::from)?;
        Ok(writer)
    }

    /// Writes every entry below `root`, creating directories as needed.
    ///
    /// # Errors
    ///
    /// Fails with an I/O error of kind `InvalidInput` if an entry name is
    /// absolute or contains `..`.
    pub fn write_to_dir(&self, root: &Path) -> Result<()> {
        for entry in &self.entries {
            let path = resolve_entry_path(root, &entry.name)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &entry.data)?;
        }

        debug!(root = %root.display(), entries = self.len(), "wrote export directory");
        Ok(())
    }
}

/// Whether `path` names a `.zip` file (extension compared case-insensitively).
pub fn is_zip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn check_entry_name(name: &str) -> Result<&Path> {
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if escapes || name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to write archive entry '{name}' outside the output directory"),
        )
        .into());
    }

    Ok(relative)
}

fn resolve_entry_path(root: &Path, name: &str) -> Result<PathBuf> {
    Ok(root.join(check_entry_name(name)?))
}

impl Converter {
    /// Converts a whole export archive.
    ///
    /// The result holds the converted chat under the destination chat file
    /// name, followed by every other entry of `archive` in its original order.
    ///
    /// # Errors
    ///
    /// - [`ChatbridgeError::UnsupportedConversion`] if `source == dest`
    /// - [`ChatbridgeError::ChatFileNotFound`] if the archive has no chat file
    /// - [`ChatbridgeError::Utf8`] if the chat file is not UTF-8
    /// - any error of [`Converter::convert`]
    pub fn convert_archive(
        &self,
        source: Platform,
        dest: Platform,
        archive: &ExportArchive,
    ) -> Result<ExportArchive> {
        check_pair(source, dest)?;

        let chat = archive.locate_chat_entry(source)?;
        debug!(entry = %chat.name, "found chat file");

        let raw = String::from_utf8(chat.data.clone()).map_err(|e| ChatbridgeError::Utf8 {
            context: chat.name.clone(),
            source: e,
        })?;

        let output = self.convert(source, dest, &raw)?;

        let mut converted = ExportArchive::new().with_entry(output.chat_file_name, output.payload);
        for entry in archive.entries.iter().filter(|e| e.name != chat.name) {
            if entry.name == output.chat_file_name {
                warn!(entry = %entry.name, "entry clashes with the converted chat file, dropping");
                continue;
            }
            converted.push(entry.clone());
        }

        info!(
            messages = output.message_count,
            passthrough = converted.len() - 1,
            "converted archive"
        );
        Ok(converted)
    }
}

/// Converts an archive with the default configuration.
pub fn convert_archive(
    source: Platform,
    dest: Platform,
    archive: &ExportArchive,
) -> Result<ExportArchive> {
    Converter::new().convert_archive(source, dest, archive)
}
