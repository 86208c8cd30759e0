// crates/iblt-sync/src/error.rs

use iblt_core::IbltError;
use thiserror::Error;

/// Errors raised while reconciling two sets.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local or remote table could not be built or combined.
    #[error("IBLT error: {0}")]
    Iblt(#[from] IbltError),

    /// The difference table was too small for the number of differences.
    /// Retry with a larger table.
    #[error("Difference decode incomplete: recovered {recovered} pairs, {residual_cells} cells left")]
    DecodeIncomplete {
        recovered: usize,
        residual_cells: usize,
    },
}
