//! SyncEngine implementation
//!
//! The engine owns the configuration it was built with and drives every
//! selected source through the pipeline in declared order. Per-source
//! failures are captured in the report; configuration problems abort the run
//! before anything is fetched.

use std::sync::Arc;

use datasync_fs::NormalizedPath;
use serde_json::Value;
use tokio::time::Instant;

use crate::cancel::CancelToken;
use crate::config::{SourceConfig, SyncConfig, contains_placeholder};
use crate::fetch::{HttpFetcher, JsonFetcher};
use crate::normalize::Normalizer;
use crate::validate::{record_count, validate};
use crate::writer::YamlWriter;
use crate::{Error, Result};

use super::progress::{NoProgress, SyncProgress};
use super::report::{SourceOutcome, SyncReport, SyncResult};

/// Options for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Fetch, normalize and validate, but leave output files untouched.
    pub dry_run: bool,
}

/// Engine for synchronizing configured sources to YAML files
pub struct SyncEngine {
    config: SyncConfig,
    fetcher: Arc<dyn JsonFetcher>,
    writer: YamlWriter,
    normalizer: Normalizer,
    progress: Arc<dyn SyncProgress>,
}

impl SyncEngine {
    /// Create an engine writing outputs relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: SyncConfig, root: NormalizedPath) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.options.max_redirects, config.options.timeout())?;
        let writer = YamlWriter::from_settings(root, &config.options);
        let normalizer = Normalizer::new(config.options.coerce_booleans);

        Ok(Self {
            config,
            fetcher: Arc::new(fetcher),
            writer,
            normalizer,
            progress: Arc::new(NoProgress),
        })
    }

    /// Replace the fetcher, e.g. with an in-memory one in tests.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn JsonFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn SyncProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Select the sources to process: the named one, or all in declared order.
    ///
    /// An empty configuration selects nothing and yields an empty report.
    pub fn resolve_targets(&self, target: Option<&str>) -> Result<Vec<&SourceConfig>> {
        match target {
            Some(name) => self
                .config
                .source(name)
                .map(|source| vec![source])
                .ok_or_else(|| {
                    let available = self.config.source_names();
                    Error::config(format!(
                        "Unknown source '{}'. Available sources: {}",
                        name,
                        if available.is_empty() {
                            "(none)".to_string()
                        } else {
                            available.join(", ")
                        }
                    ))
                }),
            None => {
                if self.config.sources.is_empty() {
                    tracing::warn!("No sources configured, nothing to sync");
                }
                Ok(self.config.sources.values().collect())
            }
        }
    }

    /// Reject sources whose URL is empty or still a template placeholder.
    ///
    /// Every source is checked and all problems are reported together.
    pub fn preflight(&self, sources: &[&SourceConfig]) -> Result<()> {
        let problems: Vec<String> = sources
            .iter()
            .filter_map(|source| {
                let url = source.source_url.trim();
                if url.is_empty() {
                    Some(format!("source '{}' has no sourceUrl", source.name))
                } else if contains_placeholder(url) {
                    Some(format!(
                        "source '{}' sourceUrl still contains a placeholder: {}",
                        source.name, url
                    ))
                } else {
                    None
                }
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::config(format!(
                "Invalid configuration: {}",
                problems.join("; ")
            )))
        }
    }

    /// Run the sync.
    ///
    /// # Errors
    ///
    /// Only configuration errors (unknown target, missing or placeholder
    /// URLs) are returned; per-source failures are recorded in the report.
    pub async fn run(
        &self,
        target: Option<&str>,
        options: RunOptions,
        cancel: &CancelToken,
    ) -> Result<SyncReport> {
        let sources = self.resolve_targets(target)?;
        self.preflight(&sources)?;

        tracing::info!(sources = sources.len(), dry_run = options.dry_run, "Starting sync");

        let mut report = SyncReport::new(options.dry_run);
        for source in sources {
            self.progress.source_started(source);

            let result = if cancel.is_cancelled() {
                Err(Error::Cancelled {
                    stage: format!("sync of {}", source.name),
                })
            } else {
                self.sync_guarded(source, options, cancel).await
            };

            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(source = %source.name, error = %e, "Source failed");
                    SyncResult::failed(&e)
                }
            };

            let outcome = SourceOutcome::new(source, result);
            self.progress.source_finished(&outcome);
            report.push(outcome);
        }

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            records = report.total_records(),
            "Sync finished"
        );
        Ok(report)
    }

    /// Run one source under the configured deadline, racing cancellation.
    ///
    /// Fetching and validation can be abandoned at any point. Deadline and
    /// cancellation are checked once more before the write; a started write
    /// always runs to completion.
    async fn sync_guarded(
        &self,
        source: &SourceConfig,
        options: RunOptions,
        cancel: &CancelToken,
    ) -> Result<SyncResult> {
        let deadline = self.config.options.timeout();
        let started = Instant::now();
        let cancelled = || Error::Cancelled {
            stage: format!("sync of {}", source.name),
        };
        let timed_out = || Error::Timeout {
            stage: format!("sync of {}", source.name),
            after: deadline,
        };

        let prepared: Result<Prepared> = tokio::select! {
            _ = cancel.cancelled() => Err(cancelled()),
            outcome = tokio::time::timeout(deadline, self.prepare(source)) => {
                outcome.unwrap_or_else(|_| Err(timed_out()))
            }
        };
        let Prepared { data, count } = prepared?;

        if options.dry_run {
            let diff = self.writer.preview(&data, &source.output_path)?;
            let output = self.writer.resolve(&source.output_path).to_string();
            return Ok(SyncResult::previewed(count, output, diff));
        }

        if cancel.is_cancelled() {
            return Err(cancelled());
        }
        if started.elapsed() >= deadline {
            return Err(timed_out());
        }

        let writer = self.writer.clone();
        let output_path = source.output_path.clone();
        let outcome =
            tokio::task::spawn_blocking(move || writer.write(&data, &output_path)).await??;

        Ok(SyncResult::written(count, &outcome))
    }

    /// Fetch, normalize and validate one source.
    async fn prepare(&self, source: &SourceConfig) -> Result<Prepared> {
        tracing::info!(source = %source.name, url = %source.source_url, "Fetching");
        let raw = self.fetcher.fetch_json(&source.source_url).await?;

        let data = self.normalizer.normalize(&raw);

        let count = if self.config.options.validate_data {
            validate(&source.name, &data)?
        } else {
            record_count(&data)
        };
        tracing::debug!(source = %source.name, count, "Normalized records");

        Ok(Prepared { data, count })
    }
}

/// Normalized data ready to be written.
struct Prepared {
    data: Value,
    count: usize,
}

/// Run a full sync with a fresh engine and return the process exit code.
///
/// Configuration errors are logged and yield 1, as does any failed source.
pub async fn run_sync(config: SyncConfig, root: NormalizedPath, target: Option<&str>) -> i32 {
    let engine = match SyncEngine::new(config, root) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create sync engine");
            return 1;
        }
    };

    match engine.run(target, RunOptions::default(), &CancelToken::new()).await {
        Ok(report) => report.exit_code(),
        Err(e) => {
            tracing::error!(error = %e, "Sync aborted");
            1
        }
    }
}
