// crates/iblt-core/src/hash.rs
//
// Slot addressing for IBLT slices.
//
// Slice `i` of a table with base seed `seed` uses the slice seed
// `s = seed + i` (wrapping) and addresses a key as
//
//     slot_hash = fmix32(crc32(s, key) ^ s)
//
// where crc32 starts from `s` as its initial value and fmix32 is the
// MurmurHash3 32-bit finalizer. CRC is linear in its initial value, so for
// keys of equal length the raw checksums of two slices differ by a constant
// and a collision in one slice would repeat in all of them. The finalizer
// breaks that. Tables that are meant to be subtracted from each other must
// agree on this formula as well as on the seed itself.

use std::fmt;

/// Maps a key to a 32-bit hash for one slice of a table.
///
/// The table reduces the result modulo its slice length, so implementations
/// only need good avalanche behavior, not a particular range.
pub trait SlotHasher: fmt::Debug + Send + Sync {
    /// Hash `key` for slice `slice` of a table built with base seed `seed`.
    fn slot_hash(&self, seed: u32, slice: usize, key: &[u8]) -> u32;
}

/// The default addressing scheme: finalized CRC-32 seeded with `seed + slice`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc32SlotHasher;

impl SlotHasher for Crc32SlotHasher {
    fn slot_hash(&self, seed: u32, slice: usize, key: &[u8]) -> u32 {
        let s = slice_seed(seed, slice);
        fmix32(checksum32(s, key) ^ s)
    }
}

/// Seed used by slice `slice` of a table with base seed `seed`.
pub fn slice_seed(seed: u32, slice: usize) -> u32 {
    seed.wrapping_add(slice as u32)
}

/// Seeded CRC-32 (IEEE polynomial) of `bytes`, starting from `seed`.
pub fn checksum32(seed: u32, bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(seed);
    hasher.update(bytes);
    hasher.finalize()
}

/// MurmurHash3 32-bit finalizer.
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
