//! Global sync options

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// How existing output files are preserved before being overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupMode {
    /// One `<path>.backup` sibling, replaced on every run
    #[default]
    Single,
    /// `<path>.<UTC timestamp>.backup`, one per run
    Timestamped,
}

impl FromStr for BackupMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(BackupMode::Single),
            "timestamped" => Ok(BackupMode::Timestamped),
            _ => Err(Error::config(format!("Invalid backup mode: {}", s))),
        }
    }
}

impl fmt::Display for BackupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupMode::Single => write!(f, "single"),
            BackupMode::Timestamped => write!(f, "timestamped"),
        }
    }
}

/// The `options` block of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    /// Copy an existing output file aside before overwriting it
    #[serde(default = "default_true")]
    pub backup_before_sync: bool,
    /// Require the fetched data to be a table of records
    #[serde(default = "default_true")]
    pub validate_data: bool,
    /// Turn `"true"`/`"yes"`/`"false"`/`"no"` field values into booleans
    #[serde(default = "default_true")]
    pub coerce_booleans: bool,
    #[serde(default)]
    pub backup_mode: BackupMode,
    /// Deadline for one source's whole pipeline
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

impl SyncSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            backup_before_sync: default_true(),
            validate_data: default_true(),
            coerce_booleans: default_true(),
            backup_mode: BackupMode::default(),
            timeout_seconds: default_timeout_seconds(),
            max_redirects: default_max_redirects(),
        }
    }
}
