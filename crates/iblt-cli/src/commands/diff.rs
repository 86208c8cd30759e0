// crates/iblt-cli/src/commands/diff.rs
//
// `iblt diff --local FILE --remote FILE`: reconcile two pairs files through
// IBLTs and print the pairs only one side holds.

use std::path::PathBuf;

use clap::Args;
use iblt_core::IbltParams;
use iblt_sync::{SetReconciler, SyncError};

use crate::config::CliConfig;
use crate::input::{read_pairs, Pair};
use crate::output::{format_json, format_table, DiffRow, OutputFormat};

#[derive(Debug, Args)]
pub struct DiffCmd {
    /// Pairs file for this side.
    #[arg(long)]
    pub local: PathBuf,

    /// Pairs file for the other side.
    #[arg(long)]
    pub remote: PathBuf,
}

/// Reconcile `local` against `remote`. Local-only rows come first, each side
/// sorted by key bytes. When a key repeats within one input, its last value
/// wins.
pub fn diff(params: &IbltParams, local: Vec<Pair>, remote: Vec<Pair>) -> Result<Vec<DiffRow>, SyncError> {
    let reconciler = SetReconciler::with_local_pairs(*params, local);
    let remote_sketch = SetReconciler::with_local_pairs(*params, remote).sketch()?;
    let difference = reconciler.compute_diff(&remote_sketch)?;

    let row = |side: &str, key: &[u8], value: &[u8]| DiffRow {
        side: side.to_string(),
        key: String::from_utf8_lossy(key).into_owned(),
        value: String::from_utf8_lossy(value).into_owned(),
    };
    let mut rows: Vec<DiffRow> = difference
        .local_only
        .iter()
        .map(|(k, v)| row("local", k, v))
        .collect();
    rows.extend(difference.remote_only.iter().map(|(k, v)| row("remote", k, v)));
    Ok(rows)
}

/// Run the diff command.
pub fn run(cmd: &DiffCmd, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let local = read_pairs(&cmd.local)?;
    let remote = read_pairs(&cmd.remote)?;
    let rows = diff(&config.table, local, remote)?;

    match config.output {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("Sets are identical.");
            } else {
                println!("{}", format_table(&rows));
            }
        }
    }

    Ok(())
}
