//! Seedable random source.
//!
//! Every shuffle and index selection the engine makes draws from one
//! `SimRng`, so two runs seeded identically produce identical fixtures.

use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Deterministic random source for slot, signer, and pool selection.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: ChaCha20Rng,
}

impl SimRng {
    /// Create a generator from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Choose `amount` distinct indexes from `0..length`, uniformly, in
    /// random order.
    ///
    /// Panics if `amount > length`; callers check this first.
    pub fn sample_indexes(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.inner, length, amount).into_vec()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform integer in `low..=high`.
    pub fn in_range(&mut self, low: usize, high: usize) -> usize {
        self.inner.gen_range(low..=high)
    }

    /// Fill a buffer with random bytes.
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        self.inner.fill(buf);
    }
}
