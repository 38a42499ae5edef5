//! Sync command implementation
//!
//! Runs the configured sources through the pipeline, printing progress as
//! each one finishes and a summary table at the end.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use datasync_core::{
    CancelToken, NoProgress, RunOptions, SourceConfig, SourceOutcome, SyncConfig, SyncEngine,
    SyncProgress, SyncReport,
};
use datasync_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Output switches for a sync run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncFlags {
    pub dry_run: bool,
    pub json: bool,
}

/// Console observer printing one line per source.
struct ConsoleProgress;

impl SyncProgress for ConsoleProgress {
    fn source_started(&self, source: &SourceConfig) {
        println!("{} Syncing {}...", "=>".blue().bold(), source.name.cyan());
    }

    fn source_finished(&self, outcome: &SourceOutcome) {
        let result = &outcome.result;
        if !result.success {
            println!(
                "   {} {}",
                "FAIL".red().bold(),
                result.error.as_deref().unwrap_or("unknown error")
            );
            return;
        }

        let target = result.output.as_deref().unwrap_or(&outcome.output_path);
        match &result.diff {
            Some(diff) if diff.new_file => println!(
                "   {} {} records, would create {}",
                "OK".green().bold(),
                result.count,
                target
            ),
            Some(diff) if diff.is_unchanged() => println!(
                "   {} {} records, {} unchanged",
                "OK".green().bold(),
                result.count,
                target
            ),
            Some(diff) => println!(
                "   {} {} records, would update {} (+{} -{})",
                "OK".green().bold(),
                result.count,
                target,
                diff.inserted,
                diff.deleted
            ),
            None => {
                println!(
                    "   {} {} records -> {}",
                    "OK".green().bold(),
                    result.count,
                    target
                );
                if let Some(backup) = &result.backup {
                    println!("   {} backup at {}", "+".dimmed(), backup.dimmed());
                }
            }
        }
    }
}

/// Run the sync command
pub async fn run_sync(
    root: &Path,
    config_path: &Path,
    source: Option<&str>,
    flags: SyncFlags,
) -> Result<()> {
    let config = SyncConfig::load(&NormalizedPath::new(config_path))?;

    let progress: Arc<dyn SyncProgress> = if flags.json {
        Arc::new(NoProgress)
    } else {
        Arc::new(ConsoleProgress)
    };
    let engine = SyncEngine::new(config, NormalizedPath::new(root))?.with_progress(progress);

    let cancel = CancelToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling remaining sources");
                cancel.cancel();
            }
        })
    };

    if flags.dry_run && !flags.json {
        println!("{} Dry run, no files will be written", "!".yellow().bold());
    }

    let result = engine
        .run(source, RunOptions { dry_run: flags.dry_run }, &cancel)
        .await;
    interrupt.abort();
    let report = result?;

    if flags.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} sources failed",
            report.failed(),
            report.sources.len()
        )))
    }
}

/// One row of the summary table: name, status, record count, detail.
fn summary_rows(report: &SyncReport) -> Vec<(String, &'static str, usize, String)> {
    report
        .sources
        .iter()
        .map(|outcome| {
            let result = &outcome.result;
            let (status, detail) = if result.success {
                ("ok", result.output.clone().unwrap_or_default())
            } else {
                ("failed", result.error.clone().unwrap_or_default())
            };
            (outcome.name.clone(), status, result.count, detail)
        })
        .collect()
}

fn print_summary(report: &SyncReport) {
    let rows = summary_rows(report);
    let width = rows.iter().map(|row| row.0.len()).max().unwrap_or(0);

    println!();
    println!("{}", "Sync summary".bold());
    for (name, status, count, detail) in &rows {
        // Pad before coloring so escape codes do not skew alignment.
        let padded = format!("{:<6}", status);
        let status = if *status == "ok" {
            padded.green()
        } else {
            padded.red()
        };
        println!(
            "   {:<width$}  {}  {:>5}  {}",
            name,
            status,
            count,
            detail,
            width = width
        );
    }

    println!();
    println!(
        "Succeeded: {}  Failed: {}  Total records: {}",
        report.succeeded().to_string().green(),
        if report.failed() > 0 {
            report.failed().to_string().red()
        } else {
            report.failed().to_string().normal()
        },
        report.total_records()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasync_core::{Error, SyncResult};

    fn failed(name: &str) -> SourceOutcome {
        SourceOutcome::new(
            &SourceConfig::new(name, "https://x", format!("data/{}.yaml", name)),
            SyncResult::failed(&Error::Http {
                url: "https://x".to_string(),
                status: 404,
                reason: "Not Found".to_string(),
            }),
        )
    }

    #[test]
    fn test_summary_rows_for_failure() {
        let mut report = SyncReport::new(false);
        report.push(failed("events"));

        let rows = summary_rows(&report);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "events");
        assert_eq!(rows[0].1, "failed");
        assert_eq!(rows[0].2, 0);
        assert!(rows[0].3.starts_with("HttpError:"));
    }

    #[test]
    fn test_summary_rows_empty_report() {
        assert!(summary_rows(&SyncReport::new(false)).is_empty());
    }
}
