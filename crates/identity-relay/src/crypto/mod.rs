//! Cryptographic capabilities consumed by the relay engine.
//!
//! This module provides:
//! - Keccak-256 hashing for commitment roots and addresses
//! - Ed25519 account keys (the identity's primary keying material)
//! - HKDF-SHA256 derivation of BLS secrets from account seeds
//! - BLS signatures over BN254 with G1 signatures, G1 compact keys and
//!   G2 extended keys
//! - A seedable random source for reproducible selections

pub mod bls;
pub mod derivation;
pub mod hash;
pub mod keys;
pub mod random;
