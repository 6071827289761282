//! Reservoir of identities that are not currently active.

use log::debug;

use super::member::{Address, Identity};
use crate::crypto::keys::KeySeed;
use crate::crypto::random::SimRng;
use crate::error::Result;

/// Inactive identities plus the seed the next synthesized identity uses.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    members: Vec<Identity>,
    next_seed: KeySeed,
}

impl IdentityPool {
    /// Create an empty pool that synthesizes identities from `seed` onwards.
    pub fn new(seed: KeySeed, capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            next_seed: seed,
        }
    }

    /// Number of identities waiting in the pool.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the pool holds no identities.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The seed the next synthesized identity will use.
    pub fn next_seed(&self) -> KeySeed {
        self.next_seed
    }

    /// Continue synthesis from `seed` if it is ahead of the current one.
    pub(crate) fn resume_from(&mut self, seed: KeySeed) {
        if seed > self.next_seed {
            self.next_seed = seed;
        }
    }

    /// Whether an identity with this address is in the pool.
    pub fn contains(&self, address: &Address) -> bool {
        self.members.iter().any(|id| id.address() == *address)
    }

    /// The pooled identities, in no meaningful order.
    pub fn members(&self) -> &[Identity] {
        &self.members
    }

    /// Take `n` identities out of the pool.
    ///
    /// Identities are synthesized from the advancing seed until at least `n`
    /// are available. The pool is then shuffled and the last `n` entries are
    /// removed and returned sorted by address, descending, which is the
    /// order the contract expects for a batch of new identities.
    pub fn draw(&mut self, n: usize, rng: &mut SimRng) -> Result<Vec<Identity>> {
        let mut synthesized = 0usize;
        while self.members.len() < n {
            self.members.push(Identity::from_seed(&self.next_seed)?);
            self.next_seed.increment();
            synthesized += 1;
        }
        if synthesized > 0 {
            debug!("synthesized {synthesized} identities, pool size {}", self.members.len());
        }

        rng.shuffle(&mut self.members);
        let mut drawn = self.members.split_off(self.members.len() - n);
        drawn.sort_by(|a, b| b.address().cmp(&a.address()));
        Ok(drawn)
    }

    /// Return identities to the pool, e.g. after they leave the active set.
    pub fn put_back<I>(&mut self, identities: I)
    where
        I: IntoIterator<Item = Identity>,
    {
        self.members.extend(identities);
    }
}
