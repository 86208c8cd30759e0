// crates/iblt-cli/src/commands/decode.rs
//
// `iblt decode --input FILE`: build a table from a pairs file, peel it, and
// print what was recovered.

use std::path::PathBuf;

use clap::Args;
use iblt_core::{IbltError, IbltParams};
use serde::Serialize;

use crate::config::CliConfig;
use crate::input::{read_pairs, Pair};
use crate::output::{format_json, format_table, OutputFormat, PairRow};

#[derive(Debug, Args)]
pub struct DecodeCmd {
    /// Tab-separated pairs file.
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// Number of pairs inserted.
    pub inserted: usize,
    /// Recovered pairs, sorted by key bytes.
    pub pairs: Vec<PairRow>,
    /// Cells left non-empty after peeling.
    pub residual_cells: usize,
    pub complete: bool,
}

/// Build a table from `pairs` and peel it.
pub fn decode(params: &IbltParams, pairs: &[Pair]) -> Result<DecodeReport, IbltError> {
    let mut iblt = super::build_table(params, pairs)?;
    let peeled = iblt.peel();

    Ok(DecodeReport {
        inserted: pairs.len(),
        pairs: peeled
            .pairs
            .iter()
            .map(|(k, v)| PairRow::new(k, v))
            .collect(),
        residual_cells: peeled.residual_cells,
        complete: peeled.is_complete(),
    })
}

/// Run the decode command.
pub fn run(cmd: &DecodeCmd, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pairs = read_pairs(&cmd.input)?;
    let report = decode(&config.table, &pairs)?;

    match config.output {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => {
            if report.pairs.is_empty() {
                println!("No pairs recovered.");
            } else {
                println!("{}", format_table(&report.pairs));
            }
            if !report.complete {
                eprintln!(
                    "Warning: partial decode, {} of {} pairs recovered, {} cells left. Try a larger --size.",
                    report.pairs.len(),
                    report.inserted,
                    report.residual_cells
                );
            }
        }
    }

    Ok(())
}
