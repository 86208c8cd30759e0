// crates/iblt-core/src/table.rs
//
// The IBLT engine: a fixed grid of cells split into H equal slices.
//
// Every key touches exactly one cell per slice. Inserts and deletes are the
// same XOR update with opposite count deltas, so delete is the algebraic
// inverse of insert rather than a guarded "remove if present". Lookup reads
// the key's cells slice by slice and only trusts pure cells.

use std::fmt;

use crate::cell::Cell;
use crate::error::IbltError;
use crate::hash::{Crc32SlotHasher, SlotHasher};
use crate::params::{IbltParams, LookupPolicy};

/// An Invertible Bloom Lookup Table over opaque byte-string keys and values.
///
/// The grid is allocated once at construction and never resized. The table
/// is single-writer: mutating operations take `&mut self`, and callers that
/// share a table across threads must wrap it in their own lock.
#[derive(Debug, Clone)]
pub struct Iblt<H = Crc32SlotHasher> {
    params: IbltParams,
    /// Cells per slice, `size / hashes`.
    slice_len: usize,
    /// Slice-major grid: the cell at (slice, slot) lives at
    /// `slice * slice_len + slot`.
    cells: Vec<Cell>,
    hasher: H,
}

impl Iblt<Crc32SlotHasher> {
    /// Create an empty table with `size` cells split into `hashes` slices.
    ///
    /// Fails with [`IbltError::InvalidConfig`] if `size` or `hashes` is zero
    /// or `hashes > size`.
    pub fn new(size: usize, hashes: usize, seed: u32) -> Result<Self, IbltError> {
        Self::with_hasher(size, hashes, seed, Crc32SlotHasher)
    }

    /// Create an empty table from a parameter set, including its lookup policy.
    pub fn from_params(params: &IbltParams) -> Result<Self, IbltError> {
        Ok(Self::new(params.size, params.hashes, params.seed)?.with_lookup(params.lookup))
    }
}

impl<H: SlotHasher> Iblt<H> {
    /// Create an empty table that addresses slots with a custom hasher.
    pub fn with_hasher(size: usize, hashes: usize, seed: u32, hasher: H) -> Result<Self, IbltError> {
        let params = IbltParams::new(size, hashes, seed);
        params.validate()?;
        let slice_len = params.slice_len();

        tracing::debug!(
            "Constructed IBLT: size={}, hashes={}, slice_len={}, seed={}",
            size,
            hashes,
            slice_len,
            seed
        );

        Ok(Self {
            params,
            slice_len,
            cells: vec![Cell::default(); hashes * slice_len],
            hasher,
        })
    }

    /// Replace the lookup policy used by [`Iblt::get`].
    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.params.lookup = lookup;
        self
    }

    /// Total cell budget given at construction.
    pub fn size(&self) -> usize {
        self.params.size
    }

    /// Number of slices.
    pub fn hashes(&self) -> usize {
        self.params.hashes
    }

    /// Base seed.
    pub fn seed(&self) -> u32 {
        self.params.seed
    }

    /// Cells per slice.
    pub fn slice_len(&self) -> usize {
        self.slice_len
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        self.params.lookup
    }

    /// The parameters this table was built with.
    pub fn params(&self) -> &IbltParams {
        &self.params
    }

    /// Borrow the cell at (`slice`, `slot`), if both are in range.
    pub fn cell(&self, slice: usize, slot: usize) -> Option<&Cell> {
        if slice >= self.params.hashes || slot >= self.slice_len {
            return None;
        }
        self.cells.get(slice * self.slice_len + slot)
    }

    /// Iterate over every reachable cell, slice by slice.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// True when every cell is empty, e.g. after a complete peel.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Number of cells that still hold something.
    pub fn residual_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Slot of `key` within slice `slice`.
    pub fn slot_index(&self, key: &[u8], slice: usize) -> usize {
        self.hasher.slot_hash(self.params.seed, slice, key) as usize % self.slice_len
    }

    /// Flat grid index of `key`'s cell in slice `slice`.
    pub(crate) fn cell_index(&self, key: &[u8], slice: usize) -> usize {
        slice * self.slice_len + self.slot_index(key, slice)
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Fold `(key, value)` into one cell per slice with the given count delta.
    pub(crate) fn apply(&mut self, delta: i64, key: &[u8], value: &[u8]) {
        for slice in 0..self.params.hashes {
            let index = self.cell_index(key, slice);
            self.cells[index].apply(delta, key, value);
        }
    }

    /// Insert a pair. Always succeeds; over capacity only degrades lookup
    /// and enumeration.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) {
        self.apply(1, key, value);
    }

    /// Delete a pair.
    ///
    /// The pair must have been inserted (or produced by enumeration).
    /// Deleting anything else is accepted silently and corrupts the cells it
    /// touches.
    pub fn delete(&mut self, key: &[u8], value: &[u8]) {
        self.apply(-1, key, value);
    }

    /// Look up the value stored for `key`.
    ///
    /// An empty cell in any slice proves the key absent. A pure cell holding
    /// this key yields its value. Any other cell with a count of one ends
    /// the search under [`LookupPolicy::Strict`] and is skipped under
    /// [`LookupPolicy::Exhaustive`]. Other mixed cells are skipped. `None` may be
    /// returned for a present key when all of its cells are mixed.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        for slice in 0..self.params.hashes {
            let cell = &self.cells[self.cell_index(key, slice)];
            match cell.count() {
                0 => return None,
                1 => match cell.decode() {
                    Some((stored, value)) if stored == key => return Some(value),
                    // A count of one that does not hold this key, whether it
                    // decodes to another key or not at all.
                    _ if self.params.lookup == LookupPolicy::Strict => return None,
                    _ => {}
                },
                _ => {}
            }
        }
        None
    }
}

impl<H: SlotHasher + Clone> fmt::Display for Iblt<H> {
    /// Render a snapshot of the recoverable pairs as `{key=>value, ...}`.
    ///
    /// Peels a copy, so the table itself is left untouched.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.clone().enumerate();
        write!(f, "{{")?;
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{}=>{}",
                String::from_utf8_lossy(key),
                String::from_utf8_lossy(value)
            )?;
        }
        write!(f, "}}")
    }
}
