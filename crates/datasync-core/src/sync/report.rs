//! Results of a sync run

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SourceConfig;
use crate::writer::{DiffSummary, WriteOutcome};
use crate::{Error, ErrorKind};

/// Outcome of syncing one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    /// Records written (or that would be written, on a dry run)
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Resolved output file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    /// Pending changes, dry runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffSummary>,
}

impl SyncResult {
    /// A source that was written successfully.
    pub fn written(count: usize, outcome: &WriteOutcome) -> Self {
        Self {
            success: true,
            count,
            error: None,
            error_kind: None,
            output: Some(outcome.path.to_string()),
            backup: outcome.backup.as_ref().map(ToString::to_string),
            diff: None,
        }
    }

    /// A source checked on a dry run.
    pub fn previewed(count: usize, output: String, diff: DiffSummary) -> Self {
        Self {
            success: true,
            count,
            error: None,
            error_kind: None,
            output: Some(output),
            backup: None,
            diff: Some(diff),
        }
    }

    /// A source whose pipeline failed.
    pub fn failed(error: &Error) -> Self {
        Self {
            success: false,
            count: 0,
            error: Some(error.report_message()),
            error_kind: Some(error.kind()),
            output: None,
            backup: None,
            diff: None,
        }
    }
}

/// A source together with its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOutcome {
    pub name: String,
    pub description: String,
    pub output_path: String,
    #[serde(flatten)]
    pub result: SyncResult,
}

impl SourceOutcome {
    pub fn new(source: &SourceConfig, result: SyncResult) -> Self {
        Self {
            name: source.name.clone(),
            description: source.description.clone(),
            output_path: source.output_path.clone(),
            result,
        }
    }
}

/// Aggregated results of one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources: Vec<SourceOutcome>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        let now = Utc::now();
        Self {
            dry_run,
            started_at: now,
            finished_at: now,
            sources: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: SourceOutcome) {
        self.sources.push(outcome);
        self.finished_at = Utc::now();
    }

    pub fn succeeded(&self) -> usize {
        self.sources.iter().filter(|o| o.result.success).count()
    }

    pub fn failed(&self) -> usize {
        self.sources.len() - self.succeeded()
    }

    /// Records across successful sources.
    pub fn total_records(&self) -> usize {
        self.sources
            .iter()
            .filter(|o| o.result.success)
            .map(|o| o.result.count)
            .sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit status: 1 if any source failed.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    pub fn outcome(&self, name: &str) -> Option<&SourceOutcome> {
        self.sources.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasync_fs::NormalizedPath;

    fn written(name: &str, count: usize) -> SourceOutcome {
        let outcome = WriteOutcome {
            path: NormalizedPath::new(format!("data/{}.yaml", name)),
            backup: None,
            bytes: 10,
        };
        SourceOutcome::new(
            &SourceConfig::new(name, "https://x", format!("data/{}.yaml", name)),
            SyncResult::written(count, &outcome),
        )
    }

    #[test]
    fn test_totals_and_exit_code() {
        let mut report = SyncReport::new(false);
        report.push(written("board", 4));
        report.push(written("events", 2));
        assert_eq!(report.total_records(), 6);
        assert_eq!(report.exit_code(), 0);

        let err = Error::config("boom");
        report.push(SourceOutcome::new(
            &SourceConfig::new("staff", "https://x", "data/staff.yaml"),
            SyncResult::failed(&err),
        ));
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.total_records(), 6);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_empty_report_succeeds() {
        assert_eq!(SyncReport::new(false).exit_code(), 0);
    }

    #[test]
    fn test_json_shape() {
        let mut report = SyncReport::new(true);
        report.push(written("board", 1));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dryRun"], true);
        assert_eq!(json["sources"][0]["name"], "board");
        assert_eq!(json["sources"][0]["success"], true);
        assert_eq!(json["sources"][0]["outputPath"], "data/board.yaml");
        assert!(json["sources"][0].get("error").is_none());
    }
}
