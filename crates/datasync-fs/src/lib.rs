//! Filesystem layer for the sheet data sync tool
//!
//! Provides normalized path resolution, atomic text writes, backup copies
//! and format-agnostic configuration loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use path::NormalizedPath;
