//! Simulation configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration and reproduces the standard fixtures.

use serde::{Deserialize, Serialize};

use crate::crypto::keys::{KeySeed, DEFAULT_KEY_SEED};
use crate::error::{RelayError, Result};

fn default_initial_height() -> u64 {
    12_345_678
}

fn default_initial_population() -> usize {
    2000
}

fn default_key_seed() -> String {
    DEFAULT_KEY_SEED.to_string()
}

fn default_pool_capacity() -> usize {
    10_000
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Height of the initial committed state.
    #[serde(default = "default_initial_height")]
    pub initial_height: u64,

    /// Number of identities in the initial active set.
    #[serde(default = "default_initial_population")]
    pub initial_population: usize,

    /// Seed for every shuffle and index selection.
    #[serde(default)]
    pub rng_seed: u64,

    /// Decimal starting seed for identity key synthesis.
    #[serde(default = "default_key_seed")]
    pub key_seed: String,

    /// Pool slots reserved up front.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            initial_height: default_initial_height(),
            initial_population: default_initial_population(),
            rng_seed: 0,
            key_seed: default_key_seed(),
            pool_capacity: default_pool_capacity(),
        }
    }
}

impl RelayConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RelayError::SerializationError(format!("relay config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.initial_population == 0 {
            return Err(RelayError::InvalidConfig(
                "initial population must be positive".into(),
            ));
        }
        self.parsed_key_seed()?;
        Ok(())
    }

    /// The key seed as a 256-bit counter.
    pub fn parsed_key_seed(&self) -> Result<KeySeed> {
        KeySeed::from_decimal(&self.key_seed)
    }
}
