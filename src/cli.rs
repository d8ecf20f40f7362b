//! Command-line interface definition using clap.
//!
//! [`Args`] is shared by the `chatbridge` binary and its tests; it maps the
//! command line onto a [`ConvertConfig`] and an [`OutputTarget`].

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{ConvertConfig, IdStrategy, TelegramConfig};
use crate::archive::is_zip_path;
use crate::convert::{archive_name, output_stem};
use crate::platform::Platform;

/// Convert chat exports between WhatsApp and Telegram, media included.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatbridge")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatbridge whatsapp telegram \"WhatsApp Chat - Bob.zip\"
    chatbridge whatsapp telegram ./WhatsApp-Chat
    chatbridge wa tg _chat.txt -o out
    chatbridge tg wa ./ChatExport_2024-01-15 --compact
    chatbridge wa tg ./export --seed 42")]
pub struct Args {
    /// Platform the export comes from
    #[arg(value_enum, ignore_case = true)]
    pub from: Platform,

    /// Platform to convert to
    #[arg(value_enum, ignore_case = true)]
    pub to: Platform,

    /// Export .zip, unpacked export directory, or a single chat file
    pub input: PathBuf,

    /// Output directory or .zip file [default: converted_chat_<TO>, plus .zip for zip input]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Seed for reproducible random Telegram ids
    #[arg(long, value_name = "N", conflicts_with = "random_ids")]
    pub seed: Option<u64>,

    /// Use non-reproducible random Telegram ids
    #[arg(long)]
    pub random_ids: bool,

    /// Write Telegram JSON without indentation
    #[arg(long)]
    pub compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Id strategy selected by `--seed` / `--random-ids`.
    pub fn id_strategy(&self) -> IdStrategy {
        match (self.seed, self.random_ids) {
            (Some(seed), _) => IdStrategy::Seeded(seed),
            (None, true) => IdStrategy::Random,
            (None, false) => IdStrategy::Derived,
        }
    }

    pub fn convert_config(&self) -> ConvertConfig {
        ConvertConfig::new().with_telegram(
            TelegramConfig::new()
                .with_id_strategy(self.id_strategy())
                .with_pretty(!self.compact),
        )
    }

    /// Where the converted export is written.
    ///
    /// An explicit `--output` ending in `.zip` is a zip file, anything else a
    /// directory. Without `--output`, zip input gives `converted_chat_<TO>.zip`
    /// and other input the `converted_chat_<TO>` directory.
    pub fn output_target(&self) -> OutputTarget {
        match &self.output {
            Some(path) if is_zip_path(path) => OutputTarget::Zip(path.clone()),
            Some(path) => OutputTarget::Directory(path.clone()),
            None if is_zip_path(&self.input) => OutputTarget::Zip(PathBuf::from(archive_name(self.to))),
            None => OutputTarget::Directory(PathBuf::from(output_stem(self.to))),
        }
    }
}

/// Destination of a converted export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Directory(PathBuf),
    Zip(PathBuf),
}

impl OutputTarget {
    pub fn path(&self) -> &Path {
        match self {
            OutputTarget::Directory(path) | OutputTarget::Zip(path) => path,
        }
    }
}
