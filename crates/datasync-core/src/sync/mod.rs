//! Source synchronization
//!
//! Runs each configured source through fetch, normalize, validate and write,
//! one source at a time.

mod engine;
mod progress;
mod report;

pub use engine::{RunOptions, SyncEngine, run_sync};
pub use progress::{NoProgress, SyncProgress};
pub use report::{SourceOutcome, SyncReport, SyncResult};
