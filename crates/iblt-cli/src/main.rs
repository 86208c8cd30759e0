// crates/iblt-cli/src/main.rs
//
// CLI entrypoint for the iblt developer tools.
//
// Builds Invertible Bloom Lookup Tables from tab-separated key/value files
// to look up keys, decode tables by peeling, and diff two sets.

mod commands;
mod config;
mod input;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::decode::DecodeCmd;
use commands::diff::DiffCmd;
use commands::get::GetCmd;
use config::{CliConfig, TableArgs};

/// Invertible Bloom Lookup Table tools.
#[derive(Parser, Debug)]
#[command(
    name = "iblt",
    version = "0.1.0",
    about = "Build, query, decode and diff Invertible Bloom Lookup Tables"
)]
struct Cli {
    /// Path to a TOML configuration file (default: ~/.iblt/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    table: TableArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one key in a table built from a pairs file.
    Get(GetCmd),

    /// Peel a table built from a pairs file and list what it recovers.
    Decode(DecodeCmd),

    /// List the pairs held by only one of two pairs files.
    Diff(DiffCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // An explicit --config must exist; the default path is optional.
    let (mut config, source) = match &cli.config {
        Some(path) => (CliConfig::load(path)?, Some(path.clone())),
        None => match config::default_path().filter(|p| p.exists()) {
            Some(path) => (CliConfig::load(&path)?, Some(path)),
            None => (CliConfig::default(), None),
        },
    };
    config.apply(&cli.table);

    // Logs go to stderr so JSON output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &source {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::debug!("No configuration file, using defaults"),
    }
    tracing::debug!(
        "Table parameters: size {}, hashes {}, seed {}, lookup {:?}",
        config.table.size,
        config.table.hashes,
        config.table.seed,
        config.table.lookup
    );

    match &cli.command {
        Commands::Get(cmd) => commands::get::run(cmd, &config)?,
        Commands::Decode(cmd) => commands::decode::run(cmd, &config)?,
        Commands::Diff(cmd) => commands::diff::run(cmd, &config)?,
    }

    Ok(())
}
