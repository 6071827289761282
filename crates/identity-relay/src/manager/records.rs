//! Structured records describing initial and transitioned states.
//!
//! Records derive `Serialize` with the field names the contract tests
//! read; writing them anywhere is left to the caller.

use serde::Serialize;

use crate::crypto::hash::Hash32;
use crate::crypto::keys::{PublicKeyG1, PublicKeyG2, Signature};
use crate::identity::{AccountSecret, Address, Identity};
use crate::registry::Bitmap;

/// Spot-check view of one active identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySample {
    pub address: Address,
    pub account_key: AccountSecret,
    pub pub_key: PublicKeyG1,
}

impl IdentitySample {
    pub fn of(id: &Identity) -> Self {
        Self {
            address: id.address(),
            account_key: id.account_secret(),
            pub_key: *id.compact_key(),
        }
    }
}

/// First, middle (slot `population / 2`) and last active identities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSetSample {
    #[serde(rename = "firstId")]
    pub first: IdentitySample,
    #[serde(rename = "middleId")]
    pub middle: IdentitySample,
    #[serde(rename = "lastId")]
    pub last: IdentitySample,
}

/// State the contract must hold after processing a record.
#[derive(Debug, Clone, Serialize)]
pub struct CheckState {
    pub valid: bool,
    pub height: u64,
    pub population: usize,
    pub root: Hash32,
    #[serde(flatten)]
    pub sample: ActiveSetSample,
}

/// The first committed state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitRecord {
    pub comment: String,
    pub height: u64,
    pub root: Hash32,
    pub identities: Vec<Address>,
    pub account_keys: Vec<AccountSecret>,
    pub pub_keys: Vec<PublicKeyG1>,
    pub checks: CheckState,
}

/// One attempted transition, exactly as submitted to the contract,
/// followed by the state the contract must hold afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub comment: String,
    pub height: u64,
    pub new_identities: Vec<Address>,
    pub new_account_keys: Vec<AccountSecret>,
    pub new_pub_keys: Vec<PublicKeyG1>,
    pub remove_flags: Bitmap,
    pub remove_count: usize,
    pub sign_flags: Bitmap,
    pub signer_count: usize,
    pub signature: Signature,
    #[serde(rename = "apk2")]
    pub aggregate_key: PublicKeyG2,
    pub checks: CheckState,
}

impl TransitionRecord {
    /// Whether the contract accepts this transition.
    pub fn accepted(&self) -> bool {
        self.checks.valid
    }
}
