//! Keccak-256 hashing.

use serde::{Serialize, Serializer};
use tiny_keccak::{Hasher, Keccak};

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// The all-zero digest, used as the genesis root and hash-chain seed.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Return the digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Return the digest as a 0x-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hash32({})", self.to_hex())
    }
}

impl Serialize for Hash32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Compute keccak256 of the given bytes.
pub fn keccak256(data: &[u8]) -> Hash32 {
    let mut h = Keccak::v256();
    h.update(data);
    let mut out = [0u8; 32];
    h.finalize(&mut out);
    Hash32(out)
}

/// Compute keccak256 over the concatenation of several byte slices.
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash32 {
    let mut h = Keccak::v256();
    for part in parts {
        h.update(part);
    }
    let mut out = [0u8; 32];
    h.finalize(&mut out);
    Hash32(out)
}

/// Encode an integer as a 32-byte big-endian word.
pub fn u256_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}
