// crates/iblt-cli/src/commands/get.rs
//
// `iblt get --input FILE KEY`: build a table from a pairs file and look up
// one key.

use std::path::PathBuf;

use clap::Args;
use iblt_core::{IbltError, IbltParams};
use serde::Serialize;

use crate::config::CliConfig;
use crate::input::{read_pairs, Pair};
use crate::output::{format_json, OutputFormat};

#[derive(Debug, Args)]
pub struct GetCmd {
    /// Tab-separated pairs file.
    #[arg(long)]
    pub input: PathBuf,

    /// Key to look up.
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetReport {
    pub key: String,
    /// None when the key is absent or could not be resolved.
    pub value: Option<String>,
}

/// Look up `key` in a table built from `pairs`.
pub fn lookup(params: &IbltParams, pairs: &[Pair], key: &str) -> Result<GetReport, IbltError> {
    let iblt = super::build_table(params, pairs)?;
    let value = iblt
        .get(key.as_bytes())
        .map(|v| String::from_utf8_lossy(&v).into_owned());
    Ok(GetReport {
        key: key.to_string(),
        value,
    })
}

/// Run the get command.
pub fn run(cmd: &GetCmd, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pairs = read_pairs(&cmd.input)?;
    let report = lookup(&config.table, &pairs, &cmd.key)?;

    match config.output {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => match &report.value {
            Some(value) => println!("{}", value),
            None => println!("Key {:?} not found", report.key),
        },
    }

    Ok(())
}
