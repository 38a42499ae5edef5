//! [`TestSite`] builder for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use datasync_fs::{ConfigStore, NormalizedPath};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary site directory holding a sync config and its outputs.
///
/// # Example
///
/// ```rust,no_run
/// use datasync_test_utils::TestSite;
///
/// let site = TestSite::new();
/// site.write_config(&[("board", "http://127.0.0.1:9/board.json", "data/board.yaml")], None);
/// site.assert_file_missing("data/board.yaml");
/// ```
pub struct TestSite {
    temp_dir: TempDir,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn normalized_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `sync-config.json` with `(name, url, output)` sources and
    /// optional `options`. Returns the config path.
    pub fn write_config(&self, sources: &[(&str, &str, &str)], options: Option<Value>) -> PathBuf {
        let mut source_map = serde_json::Map::new();
        for (name, url, output) in sources {
            source_map.insert(
                name.to_string(),
                json!({
                    "sourceUrl": url,
                    "outputPath": output,
                    "description": format!("{} data", name),
                }),
            );
        }
        let config = json!({
            "sources": source_map,
            "options": options.unwrap_or_else(|| json!({})),
        });

        let path = self.path("sync-config.json");
        ConfigStore::new()
            .save(&NormalizedPath::new(&path), &config)
            .expect("TestSite::write_config: failed to save config");
        path
    }

    /// Write a file relative to the site root, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("TestSite::read_file({}): {}", relative, e))
    }

    pub fn assert_file_exists(&self, relative: &str) {
        assert!(self.path(relative).exists(), "expected {} to exist", relative);
    }

    pub fn assert_file_missing(&self, relative: &str) {
        assert!(!self.path(relative).exists(), "expected {} to be absent", relative);
    }
}
