//! Aggregate-verification vectors for the contract's `verify` entry point.
//!
//! Each vector carries `keys` aggregated public keys in both forms, a
//! message, and the aggregate of the first `keys` signatures over it.
//! Secrets accumulate across cases, so a case reuses the keys of every
//! smaller case before it.

use log::debug;
use serde::Serialize;

use crate::crypto::bls;
use crate::crypto::keys::{BlsSecretKey, PublicKeyG1, PublicKeyG2, Signature};
use crate::crypto::random::SimRng;
use crate::error::{RelayError, Result};

/// Number of keys and the message they sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCase {
    pub keys: usize,
    pub message: String,
}

impl VerifyCase {
    pub fn new(keys: usize, message: impl Into<String>) -> Self {
        Self {
            keys,
            message: message.into(),
        }
    }
}

/// One generated vector.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyVector {
    pub keys: usize,
    pub apk1: PublicKeyG1,
    pub apk2: PublicKeyG2,
    pub message: String,
    pub signature: Signature,
}

/// The standard case list, from a single key up to ten thousand.
pub fn default_verify_cases() -> Vec<VerifyCase> {
    let long = format!("long message: {}", "9".repeat(88));
    vec![
        VerifyCase::new(1, ""),
        VerifyCase::new(1, "idena go"),
        VerifyCase::new(1, long),
        VerifyCase::new(2, "2 keys 1"),
        VerifyCase::new(2, "2 keys 2"),
        VerifyCase::new(3, "3 keys"),
        VerifyCase::new(4, "4 keys"),
        VerifyCase::new(10, "10 keys"),
        VerifyCase::new(100, "100 keys"),
        VerifyCase::new(356, "356 keys"),
        VerifyCase::new(800, "800 keys"),
        VerifyCase::new(1024, "1024 keys"),
        VerifyCase::new(2048, "2048 keys"),
        VerifyCase::new(4000, "4000 keys"),
        // fixtures in use sign this case with the 4000-key message
        VerifyCase::new(6000, "4000 keys"),
        VerifyCase::new(9000, "9000 keys"),
        VerifyCase::new(10000, "10000 keys"),
    ]
}

fn random_secret(rng: &mut SimRng) -> Result<BlsSecretKey> {
    let mut bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut bytes);
        match BlsSecretKey::from_be_bytes(&bytes) {
            Ok(secret) => {
                crate::crypto::keys::wipe(&mut bytes);
                return Ok(secret);
            }
            Err(RelayError::InvalidKey(_)) => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Generate one vector per case, self-verifying each.
pub fn generate_verify_vectors(cases: &[VerifyCase], rng: &mut SimRng) -> Result<Vec<VerifyVector>> {
    let mut secrets: Vec<BlsSecretKey> = Vec::new();
    let mut keys_g1: Vec<PublicKeyG1> = Vec::new();
    let mut keys_g2: Vec<PublicKeyG2> = Vec::new();
    let mut vectors = Vec::with_capacity(cases.len());

    for (i, case) in cases.iter().enumerate() {
        debug!("generating {}: keys={}, message={:?}", i + 1, case.keys, case.message);
        while secrets.len() < case.keys {
            let secret = random_secret(rng)?;
            keys_g1.push(secret.public_g1());
            keys_g2.push(secret.public_g2());
            secrets.push(secret);
        }

        let message = case.message.as_bytes();
        let signatures = secrets[..case.keys]
            .iter()
            .map(|sk| bls::sign(sk, message))
            .collect::<Result<Vec<_>>>()?;
        let signature = bls::aggregate_signatures(&signatures);
        let apk1 = bls::aggregate_keys_g1(&keys_g1[..case.keys]);
        let apk2 = bls::aggregate_keys_g2(&keys_g2[..case.keys]);

        if !bls::verify(message, &signature, &apk2)? {
            return Err(RelayError::VectorSelfCheck {
                keys: case.keys,
                message: case.message.clone(),
            });
        }
        vectors.push(VerifyVector {
            keys: case.keys,
            apk1,
            apk2,
            message: case.message.clone(),
            signature,
        });
    }
    Ok(vectors)
}
