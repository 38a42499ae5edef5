//! Sheet data sync CLI
//!
//! Pulls the configured spreadsheet exports and writes them as YAML data
//! files for the site.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(?cli, "Parsed arguments");

    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(&cli.config);

    if cli.list {
        return commands::run_list(&config_path, cli.json);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(commands::run_sync(
        &cwd,
        &config_path,
        cli.source.as_deref(),
        commands::SyncFlags {
            dry_run: cli.dry_run,
            json: cli.json,
        },
    ))
}
