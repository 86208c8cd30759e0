// crates/iblt-core/src/lib.rs
//
// iblt-core: an Invertible Bloom Lookup Table over byte-string pairs.
//
// The table is a fixed grid of cells split into H slices. Each pair is
// XOR-folded into one cell per slice, which makes delete the exact inverse
// of insert and lets the whole contents be recovered by peeling pure cells,
// as long as the table is not over capacity. Subtracting two compatible
// tables yields a table of their differences, the basis of set
// reconciliation.

pub mod cell;
pub mod diff;
pub mod error;
pub mod hash;
pub mod params;
pub mod peel;
pub mod table;

#[cfg(test)]
mod proptests;

pub use cell::{xor_widen, Cell};
pub use diff::Difference;
pub use error::IbltError;
pub use hash::{checksum32, fmix32, slice_seed, Crc32SlotHasher, SlotHasher};
pub use params::{IbltParams, LookupPolicy};
pub use peel::Peeled;
pub use table::Iblt;
