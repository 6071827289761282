//! The registry state manager and its snapshot/rollback.

use log::{debug, info, warn};

use super::records::{ActiveSetSample, CheckState, IdentitySample, InitRecord, TransitionRecord};
use crate::config::RelayConfig;
use crate::crypto::hash::Hash32;
use crate::crypto::keys::{KeySeed, PublicKeyG2, Signature};
use crate::crypto::random::SimRng;
use crate::error::{RelayError, Result, TransitionCounters};
use crate::identity::{account_secrets, addresses, compact_keys, Identity, IdentityPool};
use crate::registry::{derive_root, Bitmap, MembershipChange, Registry};
use crate::threshold::{self, SignerSelection};

/// Everything a rejected transition must put back: active set, pool,
/// root and height. Cloning is a deep copy.
#[derive(Debug, Clone)]
pub struct RegistryState {
    registry: Registry,
    pool: IdentityPool,
    root: Hash32,
    height: u64,
}

impl RegistryState {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn pool(&self) -> &IdentityPool {
        &self.pool
    }

    pub fn root(&self) -> Hash32 {
        self.root
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn population(&self) -> usize {
        self.registry.population()
    }
}

/// A transition that has been applied tentatively.
struct Proposal {
    selection: SignerSelection,
    change: MembershipChange,
    signature: Signature,
    aggregate_key: PublicKeyG2,
    accepted: bool,
}

/// Owns one registry, one pool, the current root and height, and the
/// random source every selection draws from.
#[derive(Debug, Clone)]
pub struct RegistryStateManager {
    state: RegistryState,
    rng: SimRng,
}

impl RegistryStateManager {
    /// Build the initial committed state described by `config`.
    pub fn initialize(config: &RelayConfig) -> Result<(Self, InitRecord)> {
        config.validate()?;
        Self::initialize_with(
            config.initial_height,
            config.initial_population,
            config.parsed_key_seed()?,
            SimRng::from_seed(config.rng_seed),
            config.pool_capacity,
        )
    }

    /// Draw `population` identities and commit them at `height`.
    ///
    /// The initial root chains from the zero root with all identities as
    /// additions and an empty removal bitmap.
    pub fn initialize_with(
        height: u64,
        population: usize,
        key_seed: KeySeed,
        mut rng: SimRng,
        pool_capacity: usize,
    ) -> Result<(Self, InitRecord)> {
        if population == 0 {
            return Err(RelayError::EmptyRegistry);
        }
        let mut pool = IdentityPool::new(key_seed, pool_capacity.max(population));
        let members = pool.draw(population, &mut rng)?;
        let root = derive_root(&Hash32::ZERO, height, &members, &Bitmap::new(0));

        let manager = Self {
            state: RegistryState {
                registry: Registry::from_members(members),
                pool,
                root,
                height,
            },
            rng,
        };
        info!("initialized height {height} with {population} identities, root {root}");

        let active = manager.active();
        let record = InitRecord {
            comment: format!("height({height}): init with {population} identities"),
            height,
            root,
            identities: addresses(active),
            account_keys: account_secrets(active),
            pub_keys: compact_keys(active),
            checks: manager.check_state(true)?,
        };
        Ok((manager, record))
    }

    /// Height of the last accepted transition.
    pub fn height(&self) -> u64 {
        self.state.height
    }

    /// Number of active identities.
    pub fn population(&self) -> usize {
        self.state.registry.population()
    }

    /// Current commitment root.
    pub fn root(&self) -> Hash32 {
        self.state.root
    }

    /// Signers needed to accept the next transition.
    pub fn quorum(&self) -> usize {
        threshold::quorum(self.population())
    }

    /// Active identities in slot order.
    pub fn active(&self) -> &[Identity] {
        self.state.registry.members()
    }

    /// Inactive identities.
    pub fn pool(&self) -> &IdentityPool {
        &self.state.pool
    }

    pub(crate) fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// First, middle and last active identities.
    pub fn sample(&self) -> Result<ActiveSetSample> {
        let active = self.active();
        match (active.first(), active.get(active.len() / 2), active.last()) {
            (Some(first), Some(middle), Some(last)) => Ok(ActiveSetSample {
                first: IdentitySample::of(first),
                middle: IdentitySample::of(middle),
                last: IdentitySample::of(last),
            }),
            _ => Err(RelayError::EmptyRegistry),
        }
    }

    /// Current state in the shape the contract tests check.
    pub fn check_state(&self, valid: bool) -> Result<CheckState> {
        Ok(CheckState {
            valid,
            height: self.height(),
            population: self.population(),
            root: self.root(),
            sample: self.sample()?,
        })
    }

    /// Deep copy of the state a rollback restores.
    pub fn snapshot(&self) -> RegistryState {
        self.state.clone()
    }

    /// Restore a snapshot.
    ///
    /// The pool's key seed is not rewound, so identities synthesized during
    /// the discarded transition are never synthesized again.
    pub fn reset(&mut self, snapshot: RegistryState) {
        let seed = self.state.pool.next_seed();
        self.state = snapshot;
        self.state.pool.resume_from(seed);
    }

    /// Attempt one transition to `height`, removing `remove_count` and
    /// adding `add_count` identities, signed by `signer_count` randomly
    /// chosen active identities.
    ///
    /// The transition is accepted when the height increases and the
    /// signers reach the quorum of the pre-transition population; otherwise
    /// the previous state is restored. Either way the record describes the
    /// attempted change. `expected_accepted` must match the decision.
    pub fn apply_transition(
        &mut self,
        height: u64,
        remove_count: usize,
        add_count: usize,
        signer_count: usize,
        expected_accepted: bool,
    ) -> Result<TransitionRecord> {
        let origin = self.snapshot();
        let counters = TransitionCounters {
            height,
            population: origin.population(),
            remove_count,
            add_count,
            signer_count,
        };
        let comment = format!(
            "height({height}): {} identities -{remove_count} +{add_count} by {signer_count} signers({:.2}%)",
            origin.population(),
            signer_count as f64 * 100.0 / origin.population() as f64,
        );

        let proposal = match self.propose(&origin, counters) {
            Ok(proposal) => proposal,
            Err(e) => {
                self.reset(origin);
                return Err(e);
            }
        };
        if proposal.accepted != expected_accepted {
            self.reset(origin);
            return Err(RelayError::ExpectationMismatch {
                expected: expected_accepted,
                computed: proposal.accepted,
                comment,
            });
        }
        if !proposal.accepted {
            warn!("rejected {comment}, rolling back");
            self.reset(origin);
        }
        info!("active identities: {}", self.population());

        let added = &proposal.change.added;
        Ok(TransitionRecord {
            comment,
            height,
            new_identities: addresses(added),
            new_account_keys: account_secrets(added),
            new_pub_keys: compact_keys(added),
            remove_flags: proposal.change.removals,
            remove_count,
            sign_flags: proposal.selection.bitmap,
            signer_count,
            signature: proposal.signature,
            aggregate_key: proposal.aggregate_key,
            checks: self.check_state(proposal.accepted)?,
        })
    }

    fn propose(&mut self, origin: &RegistryState, counters: TransitionCounters) -> Result<Proposal> {
        // A transition may not leave the registry empty.
        let remaining = origin.population().checked_sub(counters.remove_count).ok_or(
            RelayError::RemoveExceedsPopulation {
                remove: counters.remove_count,
                population: origin.population(),
            },
        )?;
        if remaining + counters.add_count == 0 {
            return Err(RelayError::EmptyRegistry);
        }

        self.state.height = counters.height;

        let selection = threshold::select_signers(
            self.state.registry.members(),
            counters.signer_count,
            &mut self.rng,
        )?;
        let change = self.state.registry.change_members(
            &mut self.state.pool,
            &mut self.rng,
            counters.remove_count,
            counters.add_count,
        )?;

        self.state.root = derive_root(
            &self.state.root,
            self.state.height,
            &change.added,
            &change.removals,
        );
        debug!("derived root {} at height {}", self.state.root, self.state.height);

        let message = self.state.root;
        let (signature, aggregate_key) =
            threshold::aggregate_sign(&selection.signers, message.as_bytes())?;
        if !threshold::verify_aggregate(message.as_bytes(), &signature, &aggregate_key)? {
            return Err(RelayError::SignatureSelfCheck(counters));
        }

        let expected = origin.population() - counters.remove_count + counters.add_count;
        if self.population() != expected {
            return Err(RelayError::PopulationMismatch { expected, counters });
        }

        let accepted = counters.height > origin.height()
            && counters.signer_count >= threshold::quorum(origin.population());
        Ok(Proposal {
            selection,
            change,
            signature,
            aggregate_key,
            accepted,
        })
    }
}
