// crates/iblt-core/src/cell.rs
//
// A single IBLT accumulator and the widening XOR it is built on.
//
// Keys and values of different lengths are folded into the same cell, so
// the sums grow to the longest operand ever seen. Alongside the sums each
// cell keeps the XOR of every folded length; for a cell holding exactly one
// item that XOR is the item's true length, which lets decoding recover
// strings that end in zero bytes or that share a cell with a longer,
// since-removed item.

/// XOR two byte strings, widening the result to the longer operand.
///
/// Bytes past the end of the shorter operand are copied from the longer one
/// unmodified, i.e. the shorter operand is treated as zero-padded.
pub fn xor_widen(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = long.to_vec();
    for (dst, src) in out.iter_mut().zip(short) {
        *dst ^= src;
    }
    out
}

/// One `(count, key_sum, value_sum)` accumulator at a fixed (slice, slot).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Net inserts minus deletes routed to this cell.
    count: i64,
    /// XOR of every key folded into this cell.
    key_sum: Vec<u8>,
    /// XOR of every value folded into this cell.
    value_sum: Vec<u8>,
    /// XOR of the lengths of every folded key.
    key_len_sum: usize,
    /// XOR of the lengths of every folded value.
    value_len_sum: usize,
}

impl Cell {
    /// Net number of items currently routed here. Negative after unmatched
    /// deletes or in a difference table.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Raw XOR of all keys, `key_len()` bytes wide.
    pub fn key_sum(&self) -> &[u8] {
        &self.key_sum
    }

    /// Raw XOR of all values, `value_len()` bytes wide.
    pub fn value_sum(&self) -> &[u8] {
        &self.value_sum
    }

    /// Longest key ever folded into this cell.
    pub fn key_len(&self) -> usize {
        self.key_sum.len()
    }

    /// Longest value ever folded into this cell.
    pub fn value_len(&self) -> usize {
        self.value_sum.len()
    }

    /// A cell with `count == 1`: decodable to exactly one pair in a
    /// well-formed table.
    pub fn is_pure(&self) -> bool {
        self.count == 1
    }

    /// No item is routed here and nothing residual is left in the sums.
    pub fn is_empty(&self) -> bool {
        self.count == 0
            && self.key_len_sum == 0
            && self.value_len_sum == 0
            && self.key_sum.iter().all(|&b| b == 0)
            && self.value_sum.iter().all(|&b| b == 0)
    }

    /// Fold one item into the cell. `delta` is `+1` for insert, `-1` for
    /// delete; the XOR half of the update is identical either way.
    pub(crate) fn apply(&mut self, delta: i64, key: &[u8], value: &[u8]) {
        self.count += delta;
        self.key_sum = xor_widen(&self.key_sum, key);
        self.value_sum = xor_widen(&self.value_sum, value);
        self.key_len_sum ^= key.len();
        self.value_len_sum ^= value.len();
    }

    /// Cell-wise difference `self - other`, used to build difference tables.
    pub(crate) fn difference(&self, other: &Cell) -> Cell {
        Cell {
            count: self.count - other.count,
            key_sum: xor_widen(&self.key_sum, &other.key_sum),
            value_sum: xor_widen(&self.value_sum, &other.value_sum),
            key_len_sum: self.key_len_sum ^ other.key_len_sum,
            value_len_sum: self.value_len_sum ^ other.value_len_sum,
        }
    }

    /// Whether the sums are consistent with a single item: both length sums
    /// fit inside their buffers and every byte past them is zero.
    pub fn is_decodable(&self) -> bool {
        fits(&self.key_sum, self.key_len_sum) && fits(&self.value_sum, self.value_len_sum)
    }

    /// Read the cell as a single `(key, value)` pair.
    ///
    /// Only meaningful when the cell holds one item (`count` of `1`, or `-1`
    /// in a difference table). Returns `None` if the sums cannot belong to a
    /// single item.
    pub fn decode(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        if !self.is_decodable() {
            return None;
        }
        Some((
            self.key_sum[..self.key_len_sum].to_vec(),
            self.value_sum[..self.value_len_sum].to_vec(),
        ))
    }
}

fn fits(sum: &[u8], len: usize) -> bool {
    len <= sum.len() && sum[len..].iter().all(|&b| b == 0)
}
