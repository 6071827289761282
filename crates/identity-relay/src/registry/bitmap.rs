//! Population-sized bit sets for removals and signers.

use serde::{Serialize, Serializer};

/// A bit set over slot indexes: bit `i` lives in `byte[i / 8]` at
/// position `i % 8`, least significant bit first.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    bytes: Vec<u8>,
    len: usize,
}

impl Bitmap {
    /// An all-clear bitmap covering `len` slots.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Set the bits at `indexes`.
    pub fn from_indexes(len: usize, indexes: &[usize]) -> Self {
        let mut bitmap = Self::new(len);
        for &i in indexes {
            bitmap.set(i);
        }
        bitmap
    }

    /// Number of slots covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bitmap covers no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `i`. `i` must be below `len`.
    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len, "bit {i} outside bitmap of {}", self.len);
        self.bytes[i / 8] |= 1 << (i % 8);
    }

    /// Whether bit `i` is set. Out-of-range bits read as clear.
    pub fn is_set(&self, i: usize) -> bool {
        i < self.len && self.bytes[i / 8] & (1 << (i % 8)) != 0
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Indexes of set bits, ascending.
    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.is_set(i))
    }

    /// The packed bytes, as hashed into the root.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The packed bytes as 0x-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bitmap({} of {}: {})", self.count(), self.len, self.to_hex())
    }
}

impl Serialize for Bitmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
