//! Commitment root derivation.
//!
//! ```text
//! ids_0    = 0x00..00
//! ids_k    = keccak256(ids_{k-1} || address_k || pub1_x_k || pub1_y_k)
//! new_root = keccak256(prev_root || u256(height) || ids_n || keccak256(removal_bitmap))
//! ```
//!
//! This is the message the quorum signs and the value the on-chain
//! verifier recomputes, so every byte of the encoding matters.

use crate::crypto::hash::{keccak256, keccak256_concat, u256_word, Hash32};
use crate::identity::Identity;

use super::bitmap::Bitmap;

/// Fold newly added identities into a hash chain, in order.
pub fn added_identities_digest(added: &[Identity]) -> Hash32 {
    added.iter().fold(Hash32::ZERO, |acc, id| {
        let (x, y) = id.compact_key().xy_words();
        keccak256_concat(&[acc.as_bytes(), id.address().as_bytes(), &x, &y])
    })
}

/// Derive the root following `prev_root` at `height`.
pub fn derive_root(prev_root: &Hash32, height: u64, added: &[Identity], removals: &Bitmap) -> Hash32 {
    let ids_digest = added_identities_digest(added);
    let removal_digest = keccak256(removals.as_bytes());
    keccak256_concat(&[
        prev_root.as_bytes(),
        &u256_word(height),
        ids_digest.as_bytes(),
        removal_digest.as_bytes(),
    ])
}
