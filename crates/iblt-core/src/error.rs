// crates/iblt-core/src/error.rs

use thiserror::Error;

/// Error types for IBLT construction and table algebra.
///
/// Lookup misses and partial decodes are not errors: they are ordinary
/// outcomes of a probabilistic structure and are reported through
/// `Option` and [`crate::Peeled`] instead.
#[derive(Debug, Error)]
pub enum IbltError {
    /// Construction parameters that would produce an empty or degenerate grid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two tables whose geometry or seed differ cannot be combined cell-wise.
    #[error("Incompatible tables: {0}")]
    Incompatible(String),
}
