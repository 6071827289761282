//! Quorum arithmetic and aggregate signing by a subset of the active set.

use log::debug;

use crate::crypto::bls;
use crate::crypto::keys::{PublicKeyG2, Signature};
use crate::crypto::random::SimRng;
use crate::error::{RelayError, Result};
use crate::identity::Identity;
use crate::registry::Bitmap;

/// Minimum signer count for a population, `(2p - 1) / 3 + 1`: the
/// smallest count that is at least two thirds of `population`. An empty
/// population needs one signer.
pub fn quorum(population: usize) -> usize {
    (2 * population).saturating_sub(1) / 3 + 1
}

/// Signers chosen for one transition.
#[derive(Debug, Clone)]
pub struct SignerSelection {
    /// The chosen identities, in selection order.
    pub signers: Vec<Identity>,
    /// Bit `i` set when the identity in slot `i` signs.
    pub bitmap: Bitmap,
}

/// Choose `count` distinct signers uniformly from `active`.
pub fn select_signers(active: &[Identity], count: usize, rng: &mut SimRng) -> Result<SignerSelection> {
    let population = active.len();
    if count == 0 || count > population {
        return Err(RelayError::InvalidSignerCount {
            requested: count,
            population,
        });
    }

    let picked = rng.sample_indexes(population, count);
    let bitmap = Bitmap::from_indexes(population, &picked);
    let signers = picked.into_iter().map(|i| active[i].clone()).collect();
    debug!("selected {count} of {population} signers");
    Ok(SignerSelection { signers, bitmap })
}

/// Every signer signs `message`; signatures and extended keys are summed.
pub fn aggregate_sign(signers: &[Identity], message: &[u8]) -> Result<(Signature, PublicKeyG2)> {
    let signatures = signers
        .iter()
        .map(|id| id.sign(message))
        .collect::<Result<Vec<_>>>()?;
    let signature = bls::aggregate_signatures(&signatures);
    let key = bls::aggregate_keys_g2(signers.iter().map(Identity::extended_key));
    Ok((signature, key))
}

/// Pairing check of an aggregate signature against an aggregate key.
pub fn verify_aggregate(message: &[u8], signature: &Signature, key: &PublicKeyG2) -> Result<bool> {
    bls::verify(message, signature, key)
}
