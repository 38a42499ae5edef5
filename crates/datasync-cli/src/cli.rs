//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use datasync_core::config::DEFAULT_CONFIG_FILE;

/// Sync spreadsheet exports into the site's YAML data files
///
/// Examples:
///   sync-data                  # Sync every configured source
///   sync-data board            # Sync only the "board" source
///   sync-data --dry-run        # Show what would change
///   sync-data --list           # Show configured sources
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "sync-data")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source to sync (all sources when omitted)
    pub source: Option<String>,

    /// Path to the sync configuration (JSON, YAML or TOML)
    #[arg(short, long, env = "SYNC_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Fetch and validate without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON for CI
    #[arg(long)]
    pub json: bool,

    /// List configured sources and exit
    #[arg(long, conflicts_with_all = ["source", "dry_run"])]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sync-data"]).unwrap();
        assert_eq!(cli.source, None);
        assert_eq!(cli.config, PathBuf::from("sync-config.json"));
        assert!(!cli.dry_run && !cli.json && !cli.list && !cli.verbose);
    }

    #[test]
    fn test_source_and_flags() {
        let cli = Cli::try_parse_from([
            "sync-data",
            "board",
            "--config",
            "scripts/sync-config.yaml",
            "--dry-run",
            "--json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.source.as_deref(), Some("board"));
        assert_eq!(cli.config, PathBuf::from("scripts/sync-config.yaml"));
        assert!(cli.dry_run && cli.json && cli.verbose);
    }

    #[test]
    fn test_list_conflicts_with_source() {
        assert!(Cli::try_parse_from(["sync-data", "board", "--list"]).is_err());
    }

    #[test]
    fn test_only_one_positional() {
        assert!(Cli::try_parse_from(["sync-data", "board", "events"]).is_err());
    }
}
