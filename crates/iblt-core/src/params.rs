// crates/iblt-core/src/params.rs
//
// Construction parameters for an IBLT.
// Deserializable so callers can embed them in their own configuration files;
// missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::IbltError;

/// What `get` does when a slice holds a pure cell for a different key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Report not-found as soon as a pure cell holds another key.
    #[default]
    Strict,
    /// Keep scanning the remaining slices for a pure cell holding this key.
    Exhaustive,
}

/// Parameters for constructing an [`crate::Iblt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbltParams {
    /// Total cell budget, split evenly across slices.
    #[serde(default = "default_size")]
    pub size: usize,

    /// Number of slices (hash functions).
    #[serde(default = "default_hashes")]
    pub hashes: usize,

    /// Base seed; slice `i` hashes with `seed + i`.
    #[serde(default = "default_seed")]
    pub seed: u32,

    /// Lookup behavior on foreign pure cells.
    #[serde(default)]
    pub lookup: LookupPolicy,
}

fn default_size() -> usize {
    100
}

fn default_hashes() -> usize {
    4
}

/// Current Unix time, truncated to 32 bits.
fn default_seed() -> u32 {
    chrono::Utc::now().timestamp() as u32
}

impl Default for IbltParams {
    fn default() -> Self {
        Self {
            size: default_size(),
            hashes: default_hashes(),
            seed: default_seed(),
            lookup: LookupPolicy::default(),
        }
    }
}

impl IbltParams {
    /// Parameters with the default lookup policy.
    pub fn new(size: usize, hashes: usize, seed: u32) -> Self {
        Self {
            size,
            hashes,
            seed,
            lookup: LookupPolicy::default(),
        }
    }

    /// Replace the lookup policy.
    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    /// Cells per slice. Remainder cells of `size / hashes` are never used.
    pub fn slice_len(&self) -> usize {
        if self.hashes == 0 {
            0
        } else {
            self.size / self.hashes
        }
    }

    /// Reject parameters that would produce an empty grid.
    pub fn validate(&self) -> Result<(), IbltError> {
        if self.size == 0 {
            return Err(IbltError::InvalidConfig(
                "size must be greater than 0".to_string(),
            ));
        }
        if self.hashes == 0 {
            return Err(IbltError::InvalidConfig(
                "hashes must be greater than 0".to_string(),
            ));
        }
        if self.hashes > self.size {
            return Err(IbltError::InvalidConfig(format!(
                "hashes ({}) must not exceed size ({})",
                self.hashes, self.size
            )));
        }
        Ok(())
    }
}
