//! Relay identities and the pool of inactive identities.
//!
//! An `Identity` is immutable once synthesized; it only moves between the
//! `IdentityPool` and the active registry.

pub mod member;
pub mod pool;

pub use member::{account_secrets, addresses, compact_keys, AccountSecret, Address, Identity};
pub use pool::IdentityPool;
