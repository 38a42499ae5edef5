//! List command implementation
//!
//! Shows the configured sources without fetching anything.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use datasync_core::SyncConfig;
use datasync_fs::NormalizedPath;

use crate::error::Result;

/// Run the list command
pub fn run_list(config_path: &Path, json: bool) -> Result<()> {
    let config = SyncConfig::load(&NormalizedPath::new(config_path))?;

    if json {
        let sources: Vec<_> = config
            .sources
            .values()
            .map(|source| {
                json!({
                    "name": source.name,
                    "description": source.description,
                    "sourceUrl": source.source_url,
                    "outputPath": source.output_path,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    if config.sources.is_empty() {
        println!("{} No sources configured.", "!".yellow().bold());
        return Ok(());
    }

    println!("{}", "Configured sources:".bold());
    let width = config.sources.keys().map(String::len).max().unwrap_or(0);
    for source in config.sources.values() {
        println!(
            "   {:<width$}  {}  {}",
            source.name.cyan(),
            source.output_path,
            source.description.dimmed(),
            width = width
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasync_test_utils::TestSite;

    #[test]
    fn test_list_with_config() {
        let site = TestSite::new();
        let path = site.write_config(
            &[("board", "https://x/board", "data/board.yaml")],
            None,
        );

        assert!(run_list(&path, false).is_ok());
        assert!(run_list(&path, true).is_ok());
    }

    #[test]
    fn test_list_missing_config() {
        let site = TestSite::new();
        assert!(run_list(&site.path("sync-config.json"), false).is_err());
    }
}
