//! permtree CLI
//!
//! Loads a definition file, merges its groups and static permissions, and
//! prints what the merged trees contain.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use permtree_cli::{Cli, PermtreeConfig, commands, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging before the definition file is read
    let log_filter = logging::init();

    let config = if cli.command.needs_config() {
        let path = PermtreeConfig::resolve_path(cli.config.as_deref());
        PermtreeConfig::load(&path)
            .with_context(|| format!("Failed to load definitions from {}", path.display()))?
    } else {
        PermtreeConfig::default()
    };

    log_filter
        .reload(logging::filter_for(&config.logging.level))
        .context("Failed to apply the configured log level")?;

    tracing::debug!(command = ?cli.command, "Running command");

    let lines = commands::run(&config, &cli.command)
        .with_context(|| format!("{:?} failed", cli.command))?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
