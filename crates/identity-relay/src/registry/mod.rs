//! The active identity set.
//!
//! The registry is an ordered, index-addressable sequence whose length is
//! the population. Membership changes reuse slots in place (see
//! [`slots`]) and every change is summarized by a removal bitmap that is
//! committed into the root (see [`root`]).

pub mod bitmap;
pub mod root;
pub mod slots;

use log::debug;

use crate::crypto::random::SimRng;
use crate::error::{RelayError, Result};
use crate::identity::{Address, Identity, IdentityPool};

pub use bitmap::Bitmap;
pub use root::{added_identities_digest, derive_root};
pub use slots::reassign_slots;

/// Outcome of one membership change.
#[derive(Debug, Clone)]
pub struct MembershipChange {
    /// Bit `i` set when the identity that occupied slot `i` was removed.
    pub removals: Bitmap,
    /// New identities, in the order they were inserted and committed.
    pub added: Vec<Identity>,
}

/// Ordered collection of active identities.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    members: Vec<Identity>,
}

impl Registry {
    /// Build a registry from an ordered list of identities.
    pub fn from_members(members: Vec<Identity>) -> Self {
        Self { members }
    }

    /// Number of active identities.
    pub fn population(&self) -> usize {
        self.members.len()
    }

    /// Active identities in slot order.
    pub fn members(&self) -> &[Identity] {
        &self.members
    }

    /// Identity at `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&Identity> {
        self.members.get(slot)
    }

    /// Whether an identity with this address is active.
    pub fn contains(&self, address: &Address) -> bool {
        self.members.iter().any(|id| id.address() == *address)
    }

    /// Remove `remove_count` random identities and insert `add_count` fresh
    /// ones drawn from `pool`.
    ///
    /// Removed identities go back to the pool, so later draws may reuse them.
    pub fn change_members(
        &mut self,
        pool: &mut IdentityPool,
        rng: &mut SimRng,
        remove_count: usize,
        add_count: usize,
    ) -> Result<MembershipChange> {
        let population = self.population();
        if remove_count > population {
            return Err(RelayError::RemoveExceedsPopulation {
                remove: remove_count,
                population,
            });
        }

        let added = pool.draw(add_count, rng)?;

        let mut removed = rng.sample_indexes(population, remove_count);
        removed.sort_unstable();
        let removals = Bitmap::from_indexes(population, &removed);

        let evicted = reassign_slots(&mut self.members, &removed, added.clone());
        pool.put_back(evicted);

        debug!(
            "membership change: -{remove_count} +{add_count}, population {population} -> {}",
            self.population()
        );
        Ok(MembershipChange { removals, added })
    }
}
