// crates/iblt-cli/src/config.rs
//
// Configuration for the iblt CLI.
// Loaded from a TOML file or populated with defaults; command-line flags
// override file values.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use iblt_core::{IbltParams, LookupPolicy};
use serde::Deserialize;

use crate::output::OutputFormat;

/// CLI configuration.
///
/// ```toml
/// log_level = "debug"
/// output = "json"
///
/// [table]
/// size = 400
/// hashes = 4
/// seed = 42
/// lookup = "exhaustive"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Table parameters. Missing fields use the `IbltParams` defaults.
    #[serde(default)]
    pub table: IbltParams,

    /// Log level used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format for command results.
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            table: IbltParams::default(),
            log_level: default_log_level(),
            output: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    pub fn apply(&mut self, args: &TableArgs) {
        if let Some(size) = args.size {
            self.table.size = size;
        }
        if let Some(hashes) = args.hashes {
            self.table.hashes = hashes;
        }
        if let Some(seed) = args.seed {
            self.table.seed = seed;
        }
        if let Some(lookup) = args.lookup {
            self.table.lookup = lookup.into();
        }
        if let Some(output) = args.output {
            self.output = output;
        }
    }
}

/// `~/.iblt/config.toml`, if a home directory can be determined.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".iblt").join("config.toml"))
}

/// Flags shared by every subcommand.
#[derive(Debug, Default, Args)]
pub struct TableArgs {
    /// Total number of cells.
    #[arg(long, global = true)]
    pub size: Option<usize>,

    /// Number of hash functions (slices).
    #[arg(long, global = true)]
    pub hashes: Option<usize>,

    /// Hash seed. Tables are only comparable when built with the same seed.
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Lookup behavior when a slice holds a pure cell for another key.
    #[arg(long, global = true, value_enum)]
    pub lookup: Option<LookupArg>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupArg {
    Strict,
    Exhaustive,
}

impl From<LookupArg> for LookupPolicy {
    fn from(arg: LookupArg) -> Self {
        match arg {
            LookupArg::Strict => LookupPolicy::Strict,
            LookupArg::Exhaustive => LookupPolicy::Exhaustive,
        }
    }
}
