//! Error types for the identity relay engine.
//!
//! Every failure the engine can detect is returned as a typed error.
//! Callers producing fixtures treat any `Err` as fatal: it means the
//! simulation itself is wrong. Private key material is never included
//! in error messages.

use std::fmt;

/// Counters describing the transition that was being applied when an
/// internal-consistency check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionCounters {
    pub height: u64,
    pub population: usize,
    pub remove_count: usize,
    pub add_count: usize,
    pub signer_count: usize,
}

impl fmt::Display for TransitionCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "height={} population={} remove={} add={} signers={}",
            self.height, self.population, self.remove_count, self.add_count, self.signer_count
        )
    }
}

/// Relay error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Cannot remove {remove} identities from a population of {population}")]
    RemoveExceedsPopulation { remove: usize, population: usize },

    #[error("Invalid signer count {requested} for a population of {population}")]
    InvalidSignerCount { requested: usize, population: usize },

    #[error("Active identity set is empty")]
    EmptyRegistry,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Aggregate signature failed self-verification ({0})")]
    SignatureSelfCheck(TransitionCounters),

    #[error("Population after transition is not {expected} ({counters})")]
    PopulationMismatch {
        expected: usize,
        counters: TransitionCounters,
    },

    #[error("Expected accepted={expected} but computed accepted={computed} for {comment}")]
    ExpectationMismatch {
        expected: bool,
        computed: bool,
        comment: String,
    },

    #[error("Aggregate of {keys} keys failed self-verification for message {message:?}")]
    VectorSelfCheck { keys: usize, message: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Message could not be mapped to a curve point")]
    HashToCurve,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, RelayError>;
