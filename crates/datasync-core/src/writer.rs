//! Writing normalized data as YAML files

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};

use datasync_fs::{NormalizedPath, io};

use crate::Result;
use crate::config::{BackupMode, SyncSettings};
use crate::yaml::to_yaml_string;

/// What a write did on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Resolved output path
    pub path: NormalizedPath,
    /// Where the previous version was copied, if a backup was taken
    pub backup: Option<NormalizedPath>,
    /// Bytes written
    pub bytes: usize,
}

/// Line-level difference between the current file and a rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    /// The target file does not exist yet
    pub new_file: bool,
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffSummary {
    /// Compare `old` (None when the file is missing) with `new`.
    pub fn between(old: Option<&str>, new: &str) -> Self {
        let Some(old) = old else {
            return Self {
                new_file: true,
                inserted: new.lines().count(),
                deleted: 0,
            };
        };

        let diff = TextDiff::from_lines(old, new);
        let mut summary = Self::default();
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => summary.inserted += 1,
                ChangeTag::Delete => summary.deleted += 1,
                ChangeTag::Equal => {}
            }
        }
        summary
    }

    pub fn is_unchanged(&self) -> bool {
        !self.new_file && self.inserted == 0 && self.deleted == 0
    }
}

/// Writes YAML data files under a root directory.
#[derive(Debug, Clone)]
pub struct YamlWriter {
    root: NormalizedPath,
    backup: Option<BackupMode>,
}

impl YamlWriter {
    /// Create a writer resolving output paths against `root`, without backups.
    pub fn new(root: NormalizedPath) -> Self {
        Self { root, backup: None }
    }

    /// Enable backups of existing files before they are overwritten.
    pub fn with_backup(mut self, mode: BackupMode) -> Self {
        self.backup = Some(mode);
        self
    }

    pub fn from_settings(root: NormalizedPath, settings: &SyncSettings) -> Self {
        let writer = Self::new(root);
        if settings.backup_before_sync {
            writer.with_backup(settings.backup_mode)
        } else {
            writer
        }
    }

    /// Resolve a configured output path.
    pub fn resolve(&self, output_path: &str) -> NormalizedPath {
        self.root.resolve(output_path)
    }

    /// Backup location for `target` under the configured mode.
    pub fn backup_path(&self, target: &NormalizedPath, mode: BackupMode) -> NormalizedPath {
        match mode {
            BackupMode::Single => target.with_suffix(".backup"),
            BackupMode::Timestamped => {
                let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
                target.with_suffix(&format!(".{}.backup", stamp))
            }
        }
    }

    /// Serialize `data` and write it to `output_path`, replacing the file.
    ///
    /// Missing parent directories are created. When backups are enabled and
    /// the file already exists, it is copied aside first.
    pub fn write(&self, data: &Value, output_path: &str) -> Result<WriteOutcome> {
        let path = self.resolve(output_path);
        let content = to_yaml_string(data);

        let backup = match self.backup {
            Some(mode) if path.is_file() => {
                let backup_path = self.backup_path(&path, mode);
                io::copy_file(&path, &backup_path)?;
                tracing::info!(path = %path, backup = %backup_path, "Backed up existing file");
                Some(backup_path)
            }
            _ => None,
        };

        io::write_text(&path, &content)?;
        tracing::info!(path = %path, bytes = content.len(), "Wrote YAML");

        Ok(WriteOutcome {
            path,
            backup,
            bytes: content.len(),
        })
    }

    /// Render `data` and compare it with what is on disk, without writing.
    pub fn preview(&self, data: &Value, output_path: &str) -> Result<DiffSummary> {
        let path = self.resolve(output_path);
        let content = to_yaml_string(data);
        let existing = io::read_text_if_exists(&path)?;
        Ok(DiffSummary::between(existing.as_deref(), &content))
    }
}
