// crates/iblt-core/src/diff.rs
//
// Table subtraction and difference decoding for set reconciliation.
//
// Two peers that build IBLTs with identical parameters can subtract one
// table from the other cell by cell. Pairs held by both sides cancel; what
// remains are the pairs only one side holds, with count +1 for the minuend's
// and -1 for the subtrahend's. A difference table is sized for the expected
// number of differences, not for the size of either set.

use std::collections::BTreeMap;

use crate::error::IbltError;
use crate::hash::SlotHasher;
use crate::peel::PeelMode;
use crate::table::Iblt;

/// The decoded contents of a difference table `local - remote`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Difference {
    /// Pairs present in the local table but not the remote one.
    pub local_only: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Pairs present in the remote table but not the local one.
    pub remote_only: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Non-empty cells left after peeling. Zero means the difference is exact.
    pub residual_cells: usize,
}

impl Difference {
    /// True if the difference table peeled down to nothing.
    pub fn is_complete(&self) -> bool {
        self.residual_cells == 0
    }

    /// Total number of differing pairs recovered.
    pub fn len(&self) -> usize {
        self.local_only.len() + self.remote_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_only.is_empty() && self.remote_only.is_empty()
    }
}

impl<H: SlotHasher + Clone> Iblt<H> {
    /// Cell-wise `self - other`.
    ///
    /// Both tables must share size, slice count and seed. The hasher itself
    /// cannot be compared, so callers must also make sure both sides use the
    /// same addressing scheme.
    pub fn subtract(&self, other: &Iblt<H>) -> Result<Iblt<H>, IbltError> {
        if self.size() != other.size()
            || self.hashes() != other.hashes()
            || self.seed() != other.seed()
        {
            return Err(IbltError::Incompatible(format!(
                "(size {}, hashes {}, seed {}) vs (size {}, hashes {}, seed {})",
                self.size(),
                self.hashes(),
                self.seed(),
                other.size(),
                other.hashes(),
                other.seed()
            )));
        }

        let mut out = self.clone();
        for (dst, src) in out.cells_mut().iter_mut().zip(other.cells()) {
            *dst = dst.difference(src);
        }
        Ok(out)
    }
}

impl<H: SlotHasher> Iblt<H> {
    /// Peel a difference table, sorting pairs by which side held them.
    ///
    /// Destructive, like [`Iblt::enumerate`]. On an ordinary table this
    /// behaves like `peel`, with everything reported as `local_only`.
    pub fn decode_difference(&mut self) -> Difference {
        let grid = self.hashes() * self.slice_len();
        let recovered = self.peel_cells(PeelMode::Signed, 0..grid);

        let mut diff = Difference::default();
        for item in recovered {
            if item.sign > 0 {
                diff.local_only.insert(item.key, item.value);
            } else {
                diff.remote_only.insert(item.key, item.value);
            }
        }
        diff.residual_cells = self.residual_cells();

        tracing::debug!(
            "Decoded difference: {} local-only, {} remote-only, {} residual cells",
            diff.local_only.len(),
            diff.remote_only.len(),
            diff.residual_cells
        );
        if diff.residual_cells > 0 {
            tracing::warn!(
                "Difference decode incomplete: {} cells could not be peeled",
                diff.residual_cells
            );
        }

        diff
    }
}
