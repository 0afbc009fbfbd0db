//! Scrapmon main entry point
//!
//! This is the command-line interface for the scrapmon screenshot archiver.

use anyhow::Context;
use clap::{Parser, Subcommand};
use scrapmon::config::{compute_config_hash, load_config, Config};
use scrapmon::scraper::{open_configured_storage, purge_command, start_command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Scrapmon: a resumable screenshot archiver
///
/// Scrapmon walks a fixed-width code space, downloads the screenshot
/// published under each code and records every attempt, so an interrupted
/// run resumes right after the last recorded code.
#[derive(Parser, Debug)]
#[command(name = "scrapmon")]
#[command(version = "1.0.0")]
#[command(about = "A resumable screenshot archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults and environment otherwise)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Archive codes, resuming after the latest recorded one
    Start {
        /// Code to start from instead of resuming
        #[arg(long, value_name = "CODE")]
        from: Option<String>,

        /// Number of codes to visit
        #[arg(short = 'n', long)]
        iterations: Option<u64>,
    },

    /// Delete every record and every saved file
    Purge,

    /// Show statistics from the database and exit
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    match &cli.config {
        Some(path) => {
            let hash = compute_config_hash(path)?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
        }
        None => tracing::info!("Using default configuration with environment overrides"),
    }

    match cli.command {
        Command::Start { from, iterations } => handle_start(&config, from, iterations).await,
        Command::Purge => handle_purge(&config),
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scrapmon=info,warn"),
            1 => EnvFilter::new("scrapmon=debug,info"),
            2 => EnvFilter::new("scrapmon=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the start command: runs one pass
async fn handle_start(
    config: &Config,
    from: Option<String>,
    iterations: Option<u64>,
) -> anyhow::Result<()> {
    tracing::info!(
        "Database: {}, storage folder: {}",
        config.database.path,
        config.storage.folder
    );
    match &config.proxy {
        Some(proxy) => tracing::info!("Routing requests through {}", proxy.url()),
        None => tracing::warn!("No proxy configured, requests go out directly"),
    }

    let report = start_command(config, from.as_deref(), iterations)
        .await
        .context("Scrape pass failed")?;

    tracing::info!(
        "Pass complete: {} new records ({} saved, {} failed), {} skipped",
        report.created(),
        report.succeeded,
        report.failed,
        report.skipped
    );
    if let Some(code) = &report.last_code {
        tracing::info!("Last code visited: {}", code);
    }

    Ok(())
}

/// Handles the purge command
fn handle_purge(config: &Config) -> anyhow::Result<()> {
    purge_command(config).context("Could not purge storage")?;
    println!("✓ Purged database and {}", config.storage.folder);
    Ok(())
}

/// Handles the stats command: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use scrapmon::output::{load_statistics, print_statistics};

    println!("Database: {}\n", config.database.path);

    let storage = open_configured_storage(config)?;
    let stats = load_statistics(&storage.db)?;
    print_statistics(&stats);

    Ok(())
}
