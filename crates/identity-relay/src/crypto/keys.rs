//! Key material held by relay identities.
//!
//! Every identity owns an Ed25519 account key, from which its address is
//! derived, and a BLS key on BN254 with two public forms:
//! - a compact G1 key, committed into the registry root
//! - an extended G2 key, aggregated for pairing verification

use ark_bn254::{Fq, Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField, Zero};
use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::{RelayError, Result};

/// Decimal starting value for identity key synthesis.
pub const DEFAULT_KEY_SEED: &str = "666666666666666666666666666666666666666666666666666666666666";

/// A 256-bit big-endian counter from which identity keys are synthesized.
///
/// Each synthesized identity consumes one value; the counter only moves
/// forward, so a fixed starting value yields the same identities on every run.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeySeed([u8; 32]);

impl KeySeed {
    /// Parse a decimal seed. Fails on non-digits or values wider than 256 bits.
    pub fn from_decimal(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(RelayError::InvalidConfig("key seed is empty".into()));
        }
        let mut bytes = [0u8; 32];
        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| RelayError::InvalidConfig(format!("key seed digit {c:?}")))?;
            let mut carry = digit;
            for byte in bytes.iter_mut().rev() {
                let v = u32::from(*byte) * 10 + carry;
                *byte = (v & 0xff) as u8;
                carry = v >> 8;
            }
            if carry != 0 {
                return Err(RelayError::InvalidConfig(
                    "key seed exceeds 256 bits".into(),
                ));
            }
        }
        Ok(Self(bytes))
    }

    /// Build a seed from raw big-endian bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Advance the counter by one, wrapping at 2^256.
    pub fn increment(&mut self) {
        for byte in self.0.iter_mut().rev() {
            let (v, overflow) = byte.overflowing_add(1);
            *byte = v;
            if !overflow {
                break;
            }
        }
    }
}

impl Default for KeySeed {
    fn default() -> Self {
        // DEFAULT_KEY_SEED as big-endian bytes
        Self([
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x6a,
            0x34, 0xc4, 0xc4, 0x0f, 0xbc, 0x16, 0xd8, 0xab,
            0xe4, 0xec, 0x2c, 0x1d, 0xb8, 0x43, 0xb5, 0xe6,
            0x0a, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa,
        ])
    }
}

impl std::fmt::Debug for KeySeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeySeed(0x{})", hex::encode(self.0))
    }
}

/// An Ed25519 account key pair.
///
/// The signing key is zeroized on drop by `ed25519-dalek`.
#[derive(Clone)]
pub struct AccountKeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl AccountKeyPair {
    /// Build the key pair from 32 secret bytes.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Return the signing key bytes. Caller must zeroize after use.
    pub fn signing_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Return the verifying key bytes.
    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }
}

/// A BLS secret scalar. Zeroed on drop.
#[derive(Clone)]
pub struct BlsSecretKey(pub(crate) Fr);

impl BlsSecretKey {
    /// Reduce big-endian bytes into a non-zero scalar.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = Fr::from_be_bytes_mod_order(bytes);
        if scalar.is_zero() {
            return Err(RelayError::InvalidKey("BLS secret reduces to zero".into()));
        }
        Ok(Self(scalar))
    }

    /// Compute the compact public key `sk * G1`.
    pub fn public_g1(&self) -> PublicKeyG1 {
        PublicKeyG1((G1Affine::generator() * self.0).into_affine())
    }

    /// Compute the extended public key `sk * G2`.
    pub fn public_g2(&self) -> PublicKeyG2 {
        PublicKeyG2((G2Affine::generator() * self.0).into_affine())
    }
}

impl Drop for BlsSecretKey {
    fn drop(&mut self) {
        self.0 = Fr::zero();
    }
}

/// Compact BLS public key on G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyG1(pub(crate) G1Affine);

impl PublicKeyG1 {
    /// Affine coordinates as two 32-byte big-endian words.
    pub fn xy_words(&self) -> ([u8; 32], [u8; 32]) {
        (fq_word(&self.0.x), fq_word(&self.0.y))
    }

    /// `[x, y]` as 0x-prefixed hex.
    pub fn to_hex(&self) -> [String; 2] {
        let (x, y) = self.xy_words();
        [word_hex(&x), word_hex(&y)]
    }
}

/// Extended BLS public key on G2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyG2(pub(crate) G2Affine);

impl PublicKeyG2 {
    /// `[x.c1, x.c0, y.c1, y.c0]` as 0x-prefixed hex, the order the EVM
    /// pairing precompile expects.
    pub fn to_hex(&self) -> [String; 4] {
        [
            word_hex(&fq_word(&self.0.x.c1)),
            word_hex(&fq_word(&self.0.x.c0)),
            word_hex(&fq_word(&self.0.y.c1)),
            word_hex(&fq_word(&self.0.y.c0)),
        ]
    }
}

/// A BLS signature (or aggregate signature) on G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub(crate) G1Affine);

impl Signature {
    /// `[x, y]` as 0x-prefixed hex.
    pub fn to_hex(&self) -> [String; 2] {
        [
            word_hex(&fq_word(&self.0.x)),
            word_hex(&fq_word(&self.0.y)),
        ]
    }
}

impl Serialize for PublicKeyG1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_hex().serialize(serializer)
    }
}

impl Serialize for PublicKeyG2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_hex().serialize(serializer)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_hex().serialize(serializer)
    }
}

/// Encode a base field element as a 32-byte big-endian word.
pub(crate) fn fq_word(f: &Fq) -> [u8; 32] {
    let bytes = f.into_bigint().to_bytes_be();
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    word
}

fn word_hex(word: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(word))
}

/// Zeroize a secret byte buffer in place.
pub(crate) fn wipe(bytes: &mut [u8]) {
    bytes.zeroize();
}
