//! Key derivation using HKDF-SHA256.
//!
//! An identity's BLS secret is derived from its account seed under a
//! fixed context string, so the seed alone reproduces every key the
//! identity holds.

use hkdf::Hkdf;
use sha2::Sha256;

use super::keys::{wipe, BlsSecretKey};
use crate::error::{RelayError, Result};

/// Derive a 32-byte child key from a root key and context string.
///
/// Uses HKDF-SHA256 (RFC 5869) with the root key as IKM and
/// the context as info.
pub fn derive_key(root_key_bytes: &[u8; 32], context: &str) -> Result<[u8; 32]> {
    let hk = Hkdf::<Sha256>::new(None, root_key_bytes);
    let mut output = [0u8; 32];
    hk.expand(context.as_bytes(), &mut output)
        .map_err(|e| RelayError::DerivationFailed(format!("HKDF expand failed: {e}")))?;
    Ok(output)
}

/// Derive the BLS secret scalar for an identity seed.
pub fn derive_bls_secret(seed: &[u8; 32]) -> Result<BlsSecretKey> {
    let mut derived = derive_key(seed, &bls_context())?;
    let secret = BlsSecretKey::from_be_bytes(&derived);
    wipe(&mut derived);
    secret
}

/// Derivation path string for the BLS signing key.
pub fn bls_context() -> String {
    "identity-relay/bls-256".to_string()
}
