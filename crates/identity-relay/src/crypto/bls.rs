//! BLS signatures over BN254.
//!
//! Signatures and compact keys live on G1, extended keys on G2. Messages
//! are mapped to G1 by try-and-increment over Keccak-256, which an EVM
//! verifier can reproduce with the same hash. A signature is accepted when
//! `e(sig, g2) == e(H(m), pk2)`; aggregates are plain point sums, so an
//! aggregate signature verifies against the sum of the signers' G2 keys.

use ark_bn254::{Bn254, Fq, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, PrimeField};

use super::hash::{keccak256, keccak256_concat};
use super::keys::{BlsSecretKey, PublicKeyG1, PublicKeyG2, Signature};
use crate::error::{RelayError, Result};

/// Upper bound on try-and-increment rounds. Each round succeeds with
/// probability about one half.
const MAX_HASH_ATTEMPTS: u32 = 256;

/// Map a message to a point on G1.
///
/// `x = keccak256(keccak256(m) || counter) mod p` for the first counter
/// where `x^3 + 3` is a square; the smaller root is taken as `y`.
/// G1 of BN254 has cofactor one, so every curve point is in the group.
pub fn hash_to_g1(message: &[u8]) -> Result<G1Affine> {
    let digest = keccak256(message);
    for counter in 0..MAX_HASH_ATTEMPTS {
        let h = keccak256_concat(&[digest.as_bytes(), &counter.to_be_bytes()]);
        let x = Fq::from_be_bytes_mod_order(h.as_bytes());
        let rhs = x.square() * x + Fq::from(3u64);
        if let Some(root) = rhs.sqrt() {
            let neg = -root;
            let y = if root.into_bigint() <= neg.into_bigint() {
                root
            } else {
                neg
            };
            return Ok(G1Affine::new_unchecked(x, y));
        }
    }
    Err(RelayError::HashToCurve)
}

/// Sign a message with a BLS secret key.
pub fn sign(secret: &BlsSecretKey, message: &[u8]) -> Result<Signature> {
    let h = hash_to_g1(message)?;
    Ok(Signature((h * secret.0).into_affine()))
}

/// Verify a (possibly aggregate) signature against a G2 key.
pub fn verify(message: &[u8], signature: &Signature, key: &PublicKeyG2) -> Result<bool> {
    let h = hash_to_g1(message)?;
    let lhs = Bn254::pairing(signature.0, G2Affine::generator());
    let rhs = Bn254::pairing(h, key.0);
    Ok(lhs == rhs)
}

/// Combine signatures into one aggregate signature.
pub fn aggregate_signatures(signatures: &[Signature]) -> Signature {
    let sum: G1Projective = signatures.iter().map(|s| s.0.into_group()).sum();
    Signature(sum.into_affine())
}

/// Combine compact keys into one aggregate G1 key.
pub fn aggregate_keys_g1<'a, I>(keys: I) -> PublicKeyG1
where
    I: IntoIterator<Item = &'a PublicKeyG1>,
{
    let sum: G1Projective = keys.into_iter().map(|k| k.0.into_group()).sum();
    PublicKeyG1(sum.into_affine())
}

/// Combine extended keys into one aggregate G2 key.
pub fn aggregate_keys_g2<'a, I>(keys: I) -> PublicKeyG2
where
    I: IntoIterator<Item = &'a PublicKeyG2>,
{
    let sum: G2Projective = keys.into_iter().map(|k| k.0.into_group()).sum();
    PublicKeyG2(sum.into_affine())
}
