use std::fs;

use datasync_fs::{ConfigFormat, ConfigStore, Error, NormalizedPath};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[rstest]
#[case("config.toml", "name = \"board\"\ncount = 3\n")]
#[case("config.json", r#"{"name": "board", "count": 3}"#)]
#[case("config.yaml", "name: board\ncount: 3\n")]
#[case("config.yml", "name: board\ncount: 3\n")]
fn test_load_by_extension(#[case] file: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(file);
    fs::write(&file_path, content).unwrap();

    let config: TestConfig = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(
        config,
        TestConfig {
            name: "board".into(),
            count: 3
        }
    );
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.ini");
    fs::write(&file_path, "name=board").unwrap();

    let result: datasync_fs::Result<TestConfig> =
        ConfigStore::new().load(&NormalizedPath::new(&file_path));

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_load_invalid_json_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, "{ not json").unwrap();

    let result: datasync_fs::Result<TestConfig> =
        ConfigStore::new().load(&NormalizedPath::new(&file_path));

    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, ConfigFormat::Json),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let result: datasync_fs::Result<TestConfig> =
        ConfigStore::new().load(&NormalizedPath::new(temp.path().join("absent.json")));

    assert!(matches!(result, Err(Error::Io { .. })));
}

#[rstest]
#[case("config.json")]
#[case("config.yaml")]
#[case("config.toml")]
fn test_save_then_load(#[case] file: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("out").join(file));
    let store = ConfigStore::new();
    let config = TestConfig {
        name: "events".into(),
        count: 7,
    };

    store.save(&path, &config).unwrap();
    let loaded: TestConfig = store.load(&path).unwrap();

    assert_eq!(loaded, config);
}
