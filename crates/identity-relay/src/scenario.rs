//! Scripted transition sequences for contract fixtures.
//!
//! A request states its height relative to the live height, how many
//! identities to remove and add, whether the signer set should reach the
//! quorum, and whether the contract is expected to accept it.

use log::info;
use serde::Serialize;

use crate::config::RelayConfig;
use crate::crypto::random::SimRng;
use crate::error::{RelayError, Result};
use crate::manager::{InitRecord, RegistryStateManager, TransitionRecord};
use crate::threshold::quorum;

/// Whether the signer count should reach the quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerDemand {
    Sufficient,
    Insufficient,
}

/// Target height relative to the height when the request is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightStep {
    Next(u64),
    Same,
    Previous(u64),
}

impl HeightStep {
    pub fn resolve(self, current: u64) -> u64 {
        match self {
            Self::Next(k) => current.saturating_add(k),
            Self::Same => current,
            Self::Previous(k) => current.saturating_sub(k),
        }
    }
}

/// One scripted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub height: HeightStep,
    pub remove: usize,
    pub add: usize,
    pub demand: SignerDemand,
    pub expect_accepted: bool,
}

impl TransitionRequest {
    /// A request the contract must accept.
    pub fn accepted(height: HeightStep, remove: usize, add: usize) -> Self {
        Self {
            height,
            remove,
            add,
            demand: SignerDemand::Sufficient,
            expect_accepted: true,
        }
    }

    /// A request the contract must reject.
    pub fn rejected(height: HeightStep, remove: usize, add: usize, demand: SignerDemand) -> Self {
        Self {
            height,
            remove,
            add,
            demand,
            expect_accepted: false,
        }
    }
}

/// Initial state plus every transition record, in order.
#[derive(Debug, Clone, Serialize)]
pub struct StateFixture {
    pub init: InitRecord,
    pub updates: Vec<TransitionRecord>,
}

/// Pick a signer count for `population`.
///
/// Sufficient counts are uniform in `quorum + 1 ..= population` (exactly
/// the quorum when it equals the population); insufficient counts are
/// uniform in `1 ..= quorum - 1`.
pub fn pick_signer_count(population: usize, demand: SignerDemand, rng: &mut SimRng) -> Result<usize> {
    let q = quorum(population);
    match demand {
        SignerDemand::Sufficient if population == 0 => Err(RelayError::InvalidSignerCount {
            requested: q,
            population,
        }),
        SignerDemand::Sufficient if q >= population => Ok(population),
        SignerDemand::Sufficient => Ok(rng.in_range(q + 1, population)),
        SignerDemand::Insufficient if q < 2 => Err(RelayError::InvalidSignerCount {
            requested: 0,
            population,
        }),
        SignerDemand::Insufficient => Ok(rng.in_range(1, q - 1)),
    }
}

/// Resolve and apply one request against the manager's live state.
pub fn apply_request(
    manager: &mut RegistryStateManager,
    request: &TransitionRequest,
) -> Result<TransitionRecord> {
    let height = request.height.resolve(manager.height());
    let population = manager.population();
    let signers = pick_signer_count(population, request.demand, manager.rng_mut())?;
    manager.apply_transition(
        height,
        request.remove,
        request.add,
        signers,
        request.expect_accepted,
    )
}

/// Initialize from `config` and apply `requests` in order.
pub fn run_scenario(config: &RelayConfig, requests: &[TransitionRequest]) -> Result<StateFixture> {
    let (mut manager, init) = RegistryStateManager::initialize(config)?;
    let updates = requests
        .iter()
        .map(|request| apply_request(&mut manager, request))
        .collect::<Result<Vec<_>>>()?;
    info!(
        "scenario finished at height {} with {} identities",
        manager.height(),
        manager.population()
    );
    Ok(StateFixture { init, updates })
}

/// The standard sequence: seven accepted changes of growing size, three
/// rejections (same height, lower height, short quorum), then one more
/// accepted change.
pub fn standard_scenario() -> Vec<TransitionRequest> {
    use HeightStep::{Next, Previous, Same};
    vec![
        TransitionRequest::accepted(Next(1), 0, 0),
        TransitionRequest::accepted(Next(1), 100, 0),
        TransitionRequest::accepted(Next(2), 0, 100),
        TransitionRequest::accepted(Next(1), 125, 173),
        TransitionRequest::accepted(Next(2), 186, 145),
        TransitionRequest::accepted(Next(4), 210, 180),
        TransitionRequest::accepted(Next(1), 180, 200),
        TransitionRequest::rejected(Same, 100, 120, SignerDemand::Sufficient),
        TransitionRequest::rejected(Previous(1), 100, 120, SignerDemand::Sufficient),
        TransitionRequest::rejected(Next(1), 100, 120, SignerDemand::Insufficient),
        TransitionRequest::accepted(Next(1), 80, 110),
    ]
}
