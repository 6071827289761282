//! Identity relay — reference state-transition engine.
//!
//! Models the off-chain behavior of the identity relay contract: a
//! registry of active identities that changes at increasing heights,
//! where every change is committed into a chained root and authorized by
//! a BLS aggregate signature from a quorum of the previous identity set.
//! The engine produces the records contract tests are checked against.

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod manager;
pub mod registry;
pub mod scenario;
pub mod threshold;
pub mod verify_vectors;

// Re-export primary types
pub use config::RelayConfig;
pub use crypto::hash::Hash32;
pub use crypto::keys::{KeySeed, PublicKeyG1, PublicKeyG2, Signature};
pub use crypto::random::SimRng;
pub use error::{RelayError, Result, TransitionCounters};
pub use identity::{Address, Identity, IdentityPool};
pub use manager::{
    ActiveSetSample, CheckState, IdentitySample, InitRecord, RegistryState, RegistryStateManager,
    TransitionRecord,
};
pub use registry::{Bitmap, MembershipChange, Registry};
pub use threshold::quorum;

// Re-export fixture generation
pub use scenario::{
    run_scenario, standard_scenario, HeightStep, SignerDemand, StateFixture, TransitionRequest,
};
pub use verify_vectors::{default_verify_cases, generate_verify_vectors, VerifyCase, VerifyVector};
