//! End-to-end CLI tests for chatbridge.
//!
//! These tests run the actual binary against export directories and zips in
//! temporary folders and check both the console output and the files written.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{TempDir, tempdir};
use zip::write::SimpleFileOptions;

// ============================================================================
// Test Fixtures
// ============================================================================

const WHATSAPP_CHAT: &str = "\
[5/3/24, 09:15:00] Alice: Hello
\u{200E}<attached: 00000012-PHOTO-2024-03-05.jpg>
[5/3/24, 09:16:00] Bob: Hi!
second line
";

const TELEGRAM_CHAT: &str = r#"{
  "name": "Bob",
  "type": "personal_chat",
  "id": 1,
  "messages": [
    {"id": 1, "type": "message", "date": "2023-01-01T10:00:00", "from": "Bob", "text": "Hi"},
    {"id": 2, "type": "message", "date": "2023-01-01T10:01:00", "from": "Alice", "text": "", "photo": "photos/photo_1.jpg"}
  ]
}"#;

/// An unpacked WhatsApp export with one photo.
fn whatsapp_export() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("_chat.txt"), WHATSAPP_CHAT).unwrap();
    fs::write(dir.path().join("00000012-PHOTO-2024-03-05.jpg"), [0xFFu8, 0xD8, 0xFF]).unwrap();
    dir
}

/// An unpacked Telegram export with its `photos/` folder.
fn telegram_export() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("result.json"), TELEGRAM_CHAT).unwrap();
    fs::create_dir(dir.path().join("photos")).unwrap();
    fs::write(dir.path().join("photos/photo_1.jpg"), [1u8, 2, 3]).unwrap();
    dir
}

/// A zipped WhatsApp export, laid out the way the phone writes it.
fn whatsapp_export_zip(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("WhatsApp Chat - Bob.zip");
    let options = SimpleFileOptions::default();

    let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
    zip.add_directory("WhatsApp Chat - Bob/", options).unwrap();
    zip.start_file("WhatsApp Chat - Bob/_chat.txt", options).unwrap();
    zip.write_all(WHATSAPP_CHAT.as_bytes()).unwrap();
    zip.start_file("WhatsApp Chat - Bob/00000012-PHOTO-2024-03-05.jpg", options)
        .unwrap();
    zip.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();
    zip.finish().unwrap();

    path
}

fn read_zip_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            std::io::Read::read_to_end(&mut file, &mut data).unwrap();
            (file.name().to_string(), data)
        })
        .collect()
}

fn chatbridge() -> Command {
    Command::cargo_bin("chatbridge").unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_whatsapp_dir_to_telegram() {
    let input = whatsapp_export();
    let out = tempdir().unwrap();
    let output = out.path().join("converted");

    chatbridge()
        .args(["whatsapp", "telegram"])
        .arg(input.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("chatbridge v"))
        .stdout(predicate::str::contains("Done!"))
        .stdout(predicate::str::contains("Media files: 1"));

    let json = read_json(&output.join("result.json"));
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["photo"], "00000012-PHOTO-2024-03-05.jpg");
    assert_eq!(messages[1]["text"], "Hi!\nsecond line");

    assert_eq!(
        fs::read(output.join("00000012-PHOTO-2024-03-05.jpg")).unwrap(),
        vec![0xFF, 0xD8, 0xFF]
    );
}

#[test]
fn test_telegram_dir_to_whatsapp_with_aliases() {
    let input = telegram_export();
    let out = tempdir().unwrap();

    chatbridge()
        .args(["tg", "WA"])
        .arg(input.path())
        .arg("--output")
        .arg(out.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.path().join("_chat.txt")).unwrap(),
        "[1/1/23, 10:00:00] Bob: Hi\n[1/1/23, 10:01:00] Alice: \n\u{200E}<attached: photos/photo_1.jpg>\n"
    );
    assert!(out.path().join("photos/photo_1.jpg").exists());
    assert!(!out.path().join("result.json").exists());
}

#[test]
fn test_single_chat_file_input() {
    let input = whatsapp_export();
    let out = tempdir().unwrap();

    chatbridge()
        .args(["wa", "tg"])
        .arg(input.path().join("_chat.txt"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Media files: 0"));

    assert!(out.path().join("result.json").exists());
}

#[test]
fn test_default_output_directory() {
    let input = telegram_export();
    let cwd = tempdir().unwrap();

    chatbridge()
        .current_dir(cwd.path())
        .args(["telegram", "whatsapp"])
        .arg(input.path())
        .assert()
        .success();

    assert!(cwd.path().join("converted_chat_whatsapp/_chat.txt").exists());
}

#[test]
fn test_zipped_export_to_telegram_zip() {
    let input = tempdir().unwrap();
    let zip_path = whatsapp_export_zip(input.path());
    let cwd = tempdir().unwrap();

    chatbridge()
        .current_dir(cwd.path())
        .args(["wa", "tg"])
        .arg(&zip_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("Media files: 1"));

    let entries = read_zip_entries(&cwd.path().join("converted_chat_telegram.zip"));
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["result.json", "WhatsApp Chat - Bob/00000012-PHOTO-2024-03-05.jpg"]
    );
    assert_eq!(entries[1].1, vec![0xFF, 0xD8, 0xFF]);

    let json: serde_json::Value = serde_json::from_slice(&entries[0].1).unwrap();
    assert_eq!(json["messages"][0]["photo"], "00000012-PHOTO-2024-03-05.jpg");
    assert_eq!(json["messages"][1]["text"], "Hi!\nsecond line");
}

#[test]
fn test_zipped_export_to_directory() {
    let input = tempdir().unwrap();
    let zip_path = whatsapp_export_zip(input.path());
    let out = tempdir().unwrap();

    chatbridge()
        .args(["whatsapp", "telegram"])
        .arg(&zip_path)
        .arg("-o")
        .arg(out.path().join("unpacked"))
        .assert()
        .success();

    assert!(out.path().join("unpacked/result.json").exists());
    assert!(
        out.path()
            .join("unpacked/WhatsApp Chat - Bob/00000012-PHOTO-2024-03-05.jpg")
            .exists()
    );
}

#[test]
fn test_directory_export_to_zip_output() {
    let input = telegram_export();
    let out = tempdir().unwrap();
    let target = out.path().join("chat.zip");

    chatbridge()
        .args(["tg", "wa"])
        .arg(input.path())
        .arg("-o")
        .arg(&target)
        .assert()
        .success();

    let entries = read_zip_entries(&target);
    assert_eq!(entries[0].0, "_chat.txt");
    assert!(entries.iter().any(|(name, data)| name == "photos/photo_1.jpg" && data == &[1, 2, 3]));
}

#[test]
fn test_corrupt_zip_fails() {
    let input = tempdir().unwrap();
    let path = input.path().join("broken.zip");
    fs::write(&path, b"definitely not a zip").unwrap();

    chatbridge()
        .current_dir(input.path())
        .args(["wa", "tg"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn test_seed_makes_output_reproducible() {
    let input = whatsapp_export();
    let out = tempdir().unwrap();

    for name in ["a", "b"] {
        chatbridge()
            .args(["wa", "tg", "--seed", "42"])
            .arg(input.path())
            .arg("-o")
            .arg(out.path().join(name))
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(out.path().join("a/result.json")).unwrap(),
        fs::read_to_string(out.path().join("b/result.json")).unwrap()
    );
}

#[test]
fn test_compact_output() {
    let input = whatsapp_export();
    let out = tempdir().unwrap();

    chatbridge()
        .args(["wa", "tg", "--compact"])
        .arg(input.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    let json = fs::read_to_string(out.path().join("result.json")).unwrap();
    assert!(!json.contains('\n'));
}

#[test]
fn test_seed_conflicts_with_random_ids() {
    chatbridge()
        .args(["wa", "tg", "in", "--seed", "1", "--random-ids"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unsupported_attachment_warns_when_verbose() {
    let input = tempdir().unwrap();
    fs::write(
        input.path().join("_chat.txt"),
        "[1/1/24, 10:00:00] A: x\n\u{200E}<attached: video.mov>\n",
    )
    .unwrap();
    let out = tempdir().unwrap();

    chatbridge()
        .args(["wa", "tg", "-v"])
        .arg(input.path())
        .arg("-o")
        .arg(out.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported attachment type"));
}

#[test]
fn test_help_and_version() {
    chatbridge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXAMPLES"));

    chatbridge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_same_platform_fails() {
    let input = whatsapp_export();

    chatbridge()
        .args(["wa", "whatsapp"])
        .arg(input.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported conversion"));
}

#[test]
fn test_missing_chat_file_fails() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("photo.jpg"), [0u8]).unwrap();

    chatbridge()
        .args(["tg", "wa"])
        .arg(input.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Chat file not found"));
}

#[test]
fn test_missing_input_fails() {
    chatbridge()
        .args(["wa", "tg", "/definitely/not/here"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_timestamp_fails() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("_chat.txt"), "[30/2/24, 10:00:00] A: x\n").unwrap();

    chatbridge()
        .args(["wa", "tg"])
        .arg(input.path())
        .arg("-o")
        .arg(input.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

#[test]
fn test_unknown_platform_fails() {
    chatbridge()
        .args(["signal", "tg", "in"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
