//! Sync configuration
//!
//! The configuration file maps source names to where their data comes from
//! and where the YAML output goes:
//!
//! ```json
//! {
//!   "sources": {
//!     "board": {
//!       "sourceUrl": "https://script.google.com/macros/s/.../exec?sheet=Board",
//!       "outputPath": "data/board.yaml",
//!       "description": "Board members"
//!     }
//!   },
//!   "options": { "backupBeforeSync": true, "validateData": true }
//! }
//! ```
//!
//! The loaded [`SyncConfig`] is an ordinary value handed to the engine.

mod placeholder;
mod settings;

pub use placeholder::contains_placeholder;
pub use settings::{BackupMode, SyncSettings};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use datasync_fs::{ConfigStore, NormalizedPath};

use crate::{Error, Result};

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sync-config.json";

/// One named data feed mapped to one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Unique key of this source in the `sources` mapping
    #[serde(skip)]
    pub name: String,
    /// URL returning the JSON table
    #[serde(default)]
    pub source_url: String,
    /// Output YAML path, relative to the working directory
    pub output_path: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl SourceConfig {
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            output_path: output_path.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The full sync configuration: sources in declared order plus options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub sources: IndexMap<String, SourceConfig>,
    #[serde(default)]
    pub options: SyncSettings,
}

impl SyncConfig {
    pub fn new(options: SyncSettings) -> Self {
        Self {
            sources: IndexMap::new(),
            options,
        }
    }

    /// Add a source, keyed by its name.
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.sources.insert(source.name.clone(), source);
        self
    }

    /// Load the configuration from a JSON, YAML or TOML file.
    ///
    /// Any failure to read or parse the file is a configuration error.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::config(format!(
                "Configuration file not found: {}",
                path
            )));
        }

        let mut config: SyncConfig = ConfigStore::new()
            .load(path)
            .map_err(|e| Error::config(e.to_string()))?;
        config.assign_names();

        tracing::debug!(path = %path, sources = config.sources.len(), "Loaded sync configuration");
        Ok(config)
    }

    /// Copy each mapping key into its source's `name`.
    fn assign_names(&mut self) {
        for (name, source) in self.sources.iter_mut() {
            source.name = name.clone();
        }
    }

    /// Look up a source by name.
    pub fn source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.get(name)
    }

    /// Source names in declared order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }
}
