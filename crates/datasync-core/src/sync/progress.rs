//! Progress notifications for a running sync

use crate::config::SourceConfig;

use super::report::SourceOutcome;

/// Observer notified as sources are processed.
///
/// Both methods default to doing nothing.
pub trait SyncProgress: Send + Sync {
    fn source_started(&self, _source: &SourceConfig) {}

    fn source_finished(&self, _outcome: &SourceOutcome) {}
}

/// Progress observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl SyncProgress for NoProgress {}
