//! YamlWriter output and backup behavior on a real filesystem.

use std::fs;

use datasync_core::{BackupMode, SyncSettings, YamlWriter};
use datasync_test_utils::TestSite;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[test]
fn test_write_creates_parent_directories() {
    let site = TestSite::new();
    let writer = YamlWriter::new(site.normalized_root());

    let outcome = writer
        .write(&json!([{"name": "Jane"}]), "data/board/members.yaml")
        .unwrap();

    assert_eq!(outcome.backup, None);
    assert_eq!(site.read_file("data/board/members.yaml"), "- name: \"Jane\"\n");
    assert_eq!(outcome.bytes, "- name: \"Jane\"\n".len());
}

#[test]
fn test_backup_holds_previous_content() {
    let site = TestSite::new();
    site.write_file("data/events.yaml", "- title: \"Old event\"\n");
    let writer = YamlWriter::new(site.normalized_root()).with_backup(BackupMode::Single);

    let outcome = writer.write(&json!([{"title": "New event"}]), "data/events.yaml").unwrap();

    assert_eq!(
        outcome.backup.as_ref().map(|p| p.file_name().unwrap().to_string()),
        Some("events.yaml.backup".to_string())
    );
    assert_eq!(site.read_file("data/events.yaml.backup"), "- title: \"Old event\"\n");
    assert_eq!(site.read_file("data/events.yaml"), "- title: \"New event\"\n");
}

#[test]
fn test_single_slot_backup_is_replaced() {
    let site = TestSite::new();
    site.write_file("data/staff.yaml", "v1\n");
    let writer = YamlWriter::new(site.normalized_root()).with_backup(BackupMode::Single);

    writer.write(&json!([{"v": 2}]), "data/staff.yaml").unwrap();
    writer.write(&json!([{"v": 3}]), "data/staff.yaml").unwrap();

    assert_eq!(site.read_file("data/staff.yaml.backup"), "- v: 2\n");
    assert_eq!(site.read_file("data/staff.yaml"), "- v: 3\n");
}

#[test]
fn test_no_backup_for_new_file() {
    let site = TestSite::new();
    let writer = YamlWriter::new(site.normalized_root()).with_backup(BackupMode::Single);

    let outcome = writer.write(&json!([]), "data/new.yaml").unwrap();

    assert_eq!(outcome.backup, None);
    site.assert_file_missing("data/new.yaml.backup");
    assert_eq!(site.read_file("data/new.yaml"), "[]\n");
}

#[test]
fn test_backups_disabled_by_settings() {
    let site = TestSite::new();
    site.write_file("data/board.yaml", "old\n");
    let settings = SyncSettings {
        backup_before_sync: false,
        ..SyncSettings::default()
    };
    let writer = YamlWriter::from_settings(site.normalized_root(), &settings);

    writer.write(&json!([]), "data/board.yaml").unwrap();

    site.assert_file_missing("data/board.yaml.backup");
}

#[test]
fn test_timestamped_backup_keeps_original_name_prefix() {
    let site = TestSite::new();
    site.write_file("data/board.yaml", "old\n");
    let writer = YamlWriter::new(site.normalized_root()).with_backup(BackupMode::Timestamped);

    let outcome = writer.write(&json!([]), "data/board.yaml").unwrap();

    let backup = outcome.backup.expect("backup taken");
    let name = backup.file_name().unwrap();
    assert!(name.starts_with("board.yaml.") && name.ends_with(".backup"), "{}", name);
    assert_eq!(fs::read_to_string(backup.to_native()).unwrap(), "old\n");
}

#[test]
fn test_written_file_parses_back() {
    let site = TestSite::new();
    let writer = YamlWriter::new(site.normalized_root());
    let data = json!([
        {"title": "Fall Festival: \"Pumpkins\"", "date": "2024-10-26", "featured": true, "slots": 40},
        {"title": "Book fair", "date": "", "featured": false, "notes": "Line one\nLine two"}
    ]);

    writer.write(&data, "data/events.yaml").unwrap();

    let parsed: Value = serde_yaml::from_str(&site.read_file("data/events.yaml")).unwrap();
    assert_eq!(parsed, data);
}

#[test]
fn test_write_fails_when_parent_is_a_file() {
    let site = TestSite::new();
    site.write_file("data", "not a directory");
    let writer = YamlWriter::new(site.normalized_root());

    let err = writer.write(&json!([]), "data/board.yaml").unwrap_err();

    assert_eq!(err.kind(), datasync_core::ErrorKind::IoError);
}

#[test]
fn test_preview_does_not_write() {
    let site = TestSite::new();
    site.write_file("data/board.yaml", "- name: \"Jane\"\n");
    let writer = YamlWriter::new(site.normalized_root());

    let diff = writer
        .preview(&json!([{"name": "Jane"}, {"name": "Sam"}]), "data/board.yaml")
        .unwrap();

    assert_eq!(diff.inserted, 1);
    assert_eq!(diff.deleted, 0);
    assert_eq!(site.read_file("data/board.yaml"), "- name: \"Jane\"\n");
}
