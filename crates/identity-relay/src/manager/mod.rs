//! State transitions of the identity registry.
//!
//! The manager owns the active set, the pool, the current root and
//! height. One call to [`RegistryStateManager::apply_transition`] selects
//! signers, changes membership, derives the new root, signs it, and either
//! commits the result or restores the snapshot taken before it started.

pub mod records;
pub mod state;

pub use records::{ActiveSetSample, CheckState, IdentitySample, InitRecord, TransitionRecord};
pub use state::{RegistryState, RegistryStateManager};
