//! Sheet data sync pipeline
//!
//! Fetches JSON tables from configured URLs, normalizes their fields,
//! validates their shape and writes them as YAML data files.
//!
//! # Modules
//!
//! - [`config`]: sources and options, loaded from JSON/YAML/TOML
//! - [`fetch`]: JSON over HTTP with bounded redirect following
//! - [`normalize`]: whitespace, emptiness and boolean canonicalization
//! - [`validate`]: table-of-records shape check
//! - [`yaml`] / [`writer`]: YAML emission and file output with backups
//! - [`sync`]: the engine running sources in order and its report

pub mod cancel;
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod sync;
pub mod validate;
pub mod writer;
pub mod yaml;

pub use cancel::CancelToken;
pub use config::{BackupMode, SourceConfig, SyncConfig, SyncSettings};
pub use error::{Error, ErrorKind, Result};
pub use fetch::{HttpFetcher, JsonFetcher};
pub use normalize::{Normalizer, normalize};
pub use sync::{NoProgress, RunOptions, SourceOutcome, SyncEngine, SyncProgress, SyncReport, SyncResult, run_sync};
pub use validate::validate;
pub use writer::{DiffSummary, WriteOutcome, YamlWriter};
pub use yaml::to_yaml_string;
