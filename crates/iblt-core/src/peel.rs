// crates/iblt-core/src/peel.rs
//
// Destructive enumeration by peeling.
//
// A pure cell names exactly one pair. Removing that pair from all of its
// cells can leave other cells pure, so peeling runs to a fixpoint over a
// dirty queue: seed it with every pure cell, and after each removal enqueue
// whichever of the touched cells became pure. The same loop decodes
// difference tables, where a count of -1 marks an item held only by the
// subtracted side.

use std::collections::{BTreeMap, VecDeque};

use crate::hash::SlotHasher;
use crate::table::Iblt;

/// Outcome of [`Iblt::peel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Peeled {
    /// Every pair recovered, keyed by key.
    pub pairs: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Non-empty cells left behind. Zero means the decode was complete.
    pub residual_cells: usize,
}

impl Peeled {
    /// True if the table was emptied, i.e. every stored pair was recovered.
    pub fn is_complete(&self) -> bool {
        self.residual_cells == 0
    }
}

/// Which cell counts count as pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PeelMode {
    /// Only `count == 1`.
    Positive,
    /// `count == 1` or `count == -1`.
    Signed,
}

/// One pair removed during a peel. `sign` is the count the pure cell had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recovered {
    pub sign: i64,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl<H: SlotHasher> Iblt<H> {
    /// Recover and remove every pair that can be peeled.
    ///
    /// Leaves the table empty when the decode succeeds. When the table was
    /// over capacity the recovered map is partial and residual cells remain;
    /// use [`Iblt::peel`] or [`Iblt::is_empty`] to tell the two apart.
    pub fn enumerate(&mut self) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.peel().pairs
    }

    /// Like [`Iblt::enumerate`], also reporting how many cells could not be
    /// peeled.
    pub fn peel(&mut self) -> Peeled {
        let grid = self.hashes() * self.slice_len();
        let recovered = self.peel_cells(PeelMode::Positive, 0..grid);

        let mut pairs = BTreeMap::new();
        for item in recovered {
            pairs.insert(item.key, item.value);
        }
        let residual_cells = self.residual_cells();

        tracing::debug!(
            "Peeled {} pairs, {} residual cells",
            pairs.len(),
            residual_cells
        );
        if residual_cells > 0 {
            tracing::warn!(
                "IBLT decode incomplete: {} cells could not be peeled",
                residual_cells
            );
        }

        Peeled {
            pairs,
            residual_cells,
        }
    }

    /// Sign of the cell at `index` if it can be peeled under `mode`.
    fn peel_sign(&self, index: usize, mode: PeelMode) -> Option<i64> {
        let cell = self.cell_at(index);
        let sign = match (cell.count(), mode) {
            (1, _) => 1,
            (-1, PeelMode::Signed) => -1,
            _ => return None,
        };
        cell.is_decodable().then_some(sign)
    }

    /// Peel to a fixpoint, seeding the queue by scanning `order`.
    pub(crate) fn peel_cells(
        &mut self,
        mode: PeelMode,
        order: impl IntoIterator<Item = usize>,
    ) -> Vec<Recovered> {
        let mut queue: VecDeque<usize> = order
            .into_iter()
            .filter(|&index| self.peel_sign(index, mode).is_some())
            .collect();

        // Each genuine item accounts for `hashes` units of total |count|, so
        // this is never reached by a well-formed table.
        let budget: u64 = self.cells().map(|c| c.count().unsigned_abs()).sum();
        let mut recovered = Vec::new();

        while let Some(index) = queue.pop_front() {
            let Some(sign) = self.peel_sign(index, mode) else {
                continue;
            };
            let Some((key, value)) = self.cell_at(index).decode() else {
                continue;
            };
            // A key that does not hash back to this cell was produced by a
            // collision of several items, not by a single one.
            if self.cell_index(&key, index / self.slice_len()) != index {
                continue;
            }
            if recovered.len() as u64 >= budget {
                tracing::warn!("Peel budget of {} exhausted, stopping early", budget);
                break;
            }

            self.apply(-sign, &key, &value);
            for slice in 0..self.hashes() {
                let touched = self.cell_index(&key, slice);
                if self.peel_sign(touched, mode).is_some() {
                    queue.push_back(touched);
                }
            }

            tracing::trace!("Peeled pair with key {:?} (sign {})", key, sign);
            recovered.push(Recovered { sign, key, value });
        }

        recovered
    }
}
