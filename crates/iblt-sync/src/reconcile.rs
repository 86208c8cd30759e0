// crates/iblt-sync/src/reconcile.rs
//
// Set reconciliation: compute the difference against a peer's IBLT and merge
// in what the peer has that we lack.
//
// Both sides must build their tables from the same IbltParams (size, hashes
// and seed). The local table minus the remote one cancels every pair both
// sides hold; peeling what is left splits it into local-only and
// remote-only pairs.

use std::collections::BTreeMap;

use iblt_core::{Difference, Iblt, IbltParams};

use crate::error::SyncError;

/// Manages set reconciliation between peers.
///
/// Holds the local key/value set and the parameters shared with peers, and
/// compares the local set against a remote IBLT to find what differs.
#[derive(Debug, Clone)]
pub struct SetReconciler {
    /// Parameters every participating peer must agree on.
    params: IbltParams,
    /// The pairs known to this node.
    local: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl SetReconciler {
    /// Create a reconciler with no local pairs.
    pub fn new(params: IbltParams) -> Self {
        Self {
            params,
            local: BTreeMap::new(),
        }
    }

    /// Create a reconciler initialized with the given local pairs.
    pub fn with_local_pairs(
        params: IbltParams,
        pairs: impl IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
    ) -> Self {
        Self {
            params,
            local: pairs.into_iter().collect(),
        }
    }

    /// Replace the local pairs.
    pub fn set_local_pairs(&mut self, pairs: impl IntoIterator<Item = (Vec<u8>, Vec<u8>)>) {
        self.local = pairs.into_iter().collect();
    }

    /// Add or replace a local pair, returning the previous value.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) -> Option<Vec<u8>> {
        self.local.insert(key, value)
    }

    /// Remove a local pair, returning its value.
    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.local.remove(key)
    }

    /// The pairs currently known to this node.
    pub fn local_pairs(&self) -> &BTreeMap<Vec<u8>, Vec<u8>> {
        &self.local
    }

    /// The shared table parameters.
    pub fn params(&self) -> &IbltParams {
        &self.params
    }

    /// Build the IBLT summarizing the local set, to be sent to a peer.
    pub fn sketch(&self) -> Result<Iblt, SyncError> {
        let mut iblt = Iblt::from_params(&self.params)?;
        for (key, value) in &self.local {
            iblt.insert(key, value);
        }
        Ok(iblt)
    }

    /// Compute the set difference between the local pairs and a remote IBLT.
    ///
    /// `local_only` in the result holds what the remote peer is missing,
    /// `remote_only` what this node is missing. Fails with
    /// [`SyncError::DecodeIncomplete`] when the shared table size is too
    /// small for the number of differences.
    ///
    /// A key whose value differs between the two sides lands in the same
    /// cells on both, so its counts cancel and it surfaces as an incomplete
    /// decode rather than as a pair on each side.
    pub fn compute_diff(&self, remote: &Iblt) -> Result<Difference, SyncError> {
        let mut diff_table = self.sketch()?.subtract(remote)?;
        let diff = diff_table.decode_difference();

        if !diff.is_complete() {
            return Err(SyncError::DecodeIncomplete {
                recovered: diff.len(),
                residual_cells: diff.residual_cells,
            });
        }

        tracing::info!(
            "Reconciled against remote: {} pairs to send, {} pairs to fetch",
            diff.local_only.len(),
            diff.remote_only.len()
        );
        Ok(diff)
    }

    /// Adopt the pairs the remote peer has and this node lacks.
    ///
    /// Returns the number of pairs added.
    pub fn merge_remote_only(&mut self, diff: &Difference) -> usize {
        let mut added = 0;
        for (key, value) in &diff.remote_only {
            if self.local.insert(key.clone(), value.clone()).is_none() {
                added += 1;
            } else {
                tracing::debug!("Remote-only key {:?} was already present locally", key);
            }
        }
        added
    }
}
