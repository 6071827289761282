//! A single relay identity.
//!
//! The account key is the identity's root: the address is the last
//! 20 bytes of `keccak256(account public key)` and the BLS secret is
//! derived from the same seed with HKDF.

use serde::{Serialize, Serializer};
use zeroize::Zeroize;

use crate::crypto::bls;
use crate::crypto::derivation::derive_bls_secret;
use crate::crypto::hash::keccak256;
use crate::crypto::keys::{
    AccountKeyPair, BlsSecretKey, KeySeed, PublicKeyG1, PublicKeyG2, Signature,
};
use crate::error::Result;

/// Fixed-width public identifier of an identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Derive the address from an account public key.
    pub fn from_account_key(public_key: &[u8; 32]) -> Self {
        let digest = keccak256(public_key);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&digest.as_bytes()[12..]);
        Self(addr)
    }

    /// Return the address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Return the address as 0x-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Account secret bytes exported into fixtures so the contract tests can
/// re-sign as the identity. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountSecret([u8; 32]);

impl AccountSecret {
    /// Return the secret as 0x-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl Drop for AccountSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for AccountSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccountSecret(..)")
    }
}

impl Serialize for AccountSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A keypair-bearing relay participant.
#[derive(Clone)]
pub struct Identity {
    address: Address,
    account: AccountKeyPair,
    bls_secret: BlsSecretKey,
    compact_key: PublicKeyG1,
    extended_key: PublicKeyG2,
}

impl Identity {
    /// Synthesize the identity for one key seed value.
    pub fn from_seed(seed: &KeySeed) -> Result<Self> {
        let account = AccountKeyPair::from_seed(seed.as_bytes());
        let bls_secret = derive_bls_secret(seed.as_bytes())?;
        Ok(Self {
            address: Address::from_account_key(&account.verifying_key_bytes()),
            compact_key: bls_secret.public_g1(),
            extended_key: bls_secret.public_g2(),
            account,
            bls_secret,
        })
    }

    /// Return the address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Return the account key pair.
    pub fn account(&self) -> &AccountKeyPair {
        &self.account
    }

    /// Return the account secret for fixture export.
    pub fn account_secret(&self) -> AccountSecret {
        AccountSecret(self.account.signing_key_bytes())
    }

    /// Return the compact (G1) public key committed into roots.
    pub fn compact_key(&self) -> &PublicKeyG1 {
        &self.compact_key
    }

    /// Return the extended (G2) public key used for pairing checks.
    pub fn extended_key(&self) -> &PublicKeyG2 {
        &self.extended_key
    }

    /// Sign a message with the identity's BLS key.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        bls::sign(&self.bls_secret, message)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.compact_key == other.compact_key
            && self.extended_key == other.extended_key
    }
}

impl Eq for Identity {}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Addresses of a slice of identities, in order.
pub fn addresses(ids: &[Identity]) -> Vec<Address> {
    ids.iter().map(Identity::address).collect()
}

/// Compact public keys of a slice of identities, in order.
pub fn compact_keys(ids: &[Identity]) -> Vec<PublicKeyG1> {
    ids.iter().map(|id| *id.compact_key()).collect()
}

/// Account secrets of a slice of identities, in order.
pub fn account_secrets(ids: &[Identity]) -> Vec<AccountSecret> {
    ids.iter().map(Identity::account_secret).collect()
}
