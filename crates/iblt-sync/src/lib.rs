// crates/iblt-sync/src/lib.rs
//
// iblt-sync: set reconciliation of key/value sets using IBLTs.
//
// Each peer summarizes its pairs in an IBLT built with shared parameters.
// Subtracting a peer's table from the local one and peeling the result
// yields exactly the pairs that differ, at a cost proportional to the number
// of differences rather than the size of either set.

pub mod error;
pub mod reconcile;

pub use error::SyncError;
pub use reconcile::SetReconciler;
