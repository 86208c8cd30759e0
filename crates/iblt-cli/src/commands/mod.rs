// crates/iblt-cli/src/commands/mod.rs
//
// Subcommand implementations for the iblt CLI.
// Each module exposes a clap Args struct, a pure function producing a
// report, and a `run` function that prints it.

pub mod decode;
pub mod diff;
pub mod get;

use iblt_core::{Iblt, IbltError, IbltParams};

use crate::input::Pair;

/// Build a table holding every pair, in input order.
pub fn build_table(params: &IbltParams, pairs: &[Pair]) -> Result<Iblt, IbltError> {
    let mut iblt = Iblt::from_params(params)?;
    for (key, value) in pairs {
        iblt.insert(key, value);
    }
    tracing::debug!(
        "Built table: {} pairs into {} cells ({} slices, seed {})",
        pairs.len(),
        iblt.size(),
        iblt.hashes(),
        iblt.seed()
    );
    Ok(iblt)
}

#[cfg(test)]
pub(crate) fn pairs(items: &[(&str, &str)]) -> Vec<Pair> {
    items
        .iter()
        .map(|(k, v)| (k.as_bytes().to_vec(), v.as_bytes().to_vec()))
        .collect()
}
