//! # chatbridge CLI
//!
//! Command-line interface for the chatbridge library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatbridge::archive::is_zip_path;
use chatbridge::cli::{Args, OutputTarget};
use chatbridge::{ChatbridgeError, Converter, ExportArchive};

fn main() {
    let args = <Args as ClapParser>::parse();

    setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatbridgeError> {
    let total_start = Instant::now();
    let target = args.output_target();

    println!("🔁 chatbridge v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 From:    {}", args.from);
    println!("🎯 To:      {}", args.to);
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", target.path().display());
    println!();

    println!("⏳ Loading export...");
    let archive = load_archive(&args.input)?;
    println!("   Found {} files", archive.len());

    println!("🔀 Converting {} → {}...", args.from, args.to);
    let convert_start = Instant::now();
    let converter = Converter::with_config(args.convert_config());
    let converted = converter.convert_archive(args.from, args.to, &archive)?;
    println!(
        "   Converted in {:.2}s",
        convert_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing {}...", target.path().display());
    match &target {
        OutputTarget::Directory(dir) => converted.write_to_dir(dir)?,
        OutputTarget::Zip(path) => converted.write_zip(path)?,
    }

    println!();
    println!(
        "✅ Done! {} written to {}",
        args.to.chat_file_name(),
        target.path().display()
    );

    println!();
    println!("📊 Summary:");
    println!("   Chat file:   {}", args.to.chat_file_name());
    println!("   Media files: {}", converted.len().saturating_sub(1));
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Reads an export zip, an unpacked export directory, or a lone chat file.
fn load_archive(input: &Path) -> Result<ExportArchive, ChatbridgeError> {
    if input.is_dir() {
        ExportArchive::from_dir(input)
    } else if is_zip_path(input) {
        ExportArchive::from_zip(input)
    } else {
        ExportArchive::from_file(input)
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
