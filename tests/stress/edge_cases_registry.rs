//! Edge case tests: quorum arithmetic, root determinism, and degenerate
//! membership changes.

use identity_relay::registry::{derive_root, slots::compact};
use identity_relay::{
    quorum, Bitmap, Hash32, Identity, IdentityPool, KeySeed, RegistryStateManager, RelayError,
    SimRng,
};
use proptest::prelude::*;
use std::sync::OnceLock;

fn identities(n: usize) -> Vec<Identity> {
    let mut pool = IdentityPool::new(KeySeed::default(), n);
    pool.draw(n, &mut SimRng::from_seed(3)).unwrap()
}

fn shared_identities() -> &'static [Identity] {
    static IDS: OnceLock<Vec<Identity>> = OnceLock::new();
    IDS.get_or_init(|| identities(3))
}

// === Quorum ===

#[test]
fn edge_quorum_small_populations() {
    let expected = [(1, 1), (2, 2), (3, 2), (4, 3), (5, 4), (6, 4), (7, 5), (10, 7)];
    for (population, q) in expected {
        assert_eq!(quorum(population), q, "population {population}");
    }
}

proptest! {
    #[test]
    fn prop_quorum_two_thirds(p in 1usize..1_000_000) {
        let q = quorum(p);
        prop_assert!(q <= p);
        // at least two thirds, and the smallest such count
        prop_assert!(3 * q >= 2 * p);
        prop_assert!(3 * (q - 1) < 2 * p);
        prop_assert!(quorum(p + 1) >= q);
    }

    #[test]
    fn prop_root_is_pure(
        prev in any::<[u8; 32]>(),
        height in any::<u64>(),
        len in 0usize..40,
        bits in proptest::collection::vec(0usize..40, 0..10),
        take in 0usize..4,
    ) {
        let added = &shared_identities()[..take.min(3)];
        let indexes: Vec<usize> = bits.into_iter().filter(|&b| b < len).collect();
        let removals = Bitmap::from_indexes(len, &indexes);
        let prev = Hash32(prev);
        let a = derive_root(&prev, height, added, &removals);
        let b = derive_root(&prev, height, added, &removals);
        prop_assert_eq!(a, b);
    }
}

// === Membership edge cases ===

#[test]
fn edge_remove_entire_population() {
    let (mut m, _) =
        RegistryStateManager::initialize_with(10, 6, KeySeed::default(), SimRng::from_seed(1), 6)
            .unwrap();
    let record = m.apply_transition(11, 6, 2, 6, true).unwrap();
    assert!(record.accepted());
    assert_eq!(m.population(), 2);
    assert_eq!(record.remove_flags.as_bytes(), &[0b0011_1111]);
}

#[test]
fn edge_emptying_the_registry_is_refused() {
    let (mut m, _) =
        RegistryStateManager::initialize_with(100, 6, KeySeed::default(), SimRng::from_seed(1), 6)
            .unwrap();
    let before = m.snapshot();

    let err = m.apply_transition(101, 6, 0, 6, true).unwrap_err();
    assert!(matches!(err, RelayError::EmptyRegistry));
    assert_eq!(m.height(), 100);
    assert_eq!(m.population(), 6);
    assert_eq!(m.root(), before.root());
    assert_eq!(m.active(), before.registry().members());

    // the manager is still usable afterwards
    let record = m.apply_transition(101, 1, 0, 6, true).unwrap();
    assert!(record.accepted());
    assert_eq!(m.population(), 5);
}

#[test]
fn edge_removed_identities_can_return() {
    let (mut m, _) =
        RegistryStateManager::initialize_with(10, 8, KeySeed::default(), SimRng::from_seed(2), 8)
            .unwrap();
    let removed: Vec<_> = {
        let before = m.active().to_vec();
        let record = m.apply_transition(11, 4, 0, 8, true).unwrap();
        record.remove_flags.indexes().map(|i| before[i].address()).collect()
    };
    assert_eq!(m.pool().len(), 4);
    let seed = m.pool().next_seed();
    // the pool can cover the draw, so nothing new is synthesized
    let record = m.apply_transition(12, 0, 4, 4, true).unwrap();
    assert_eq!(m.pool().next_seed(), seed);
    let mut readded = record.new_identities.clone();
    readded.sort();
    let mut expected = removed;
    expected.sort();
    assert_eq!(readded, expected);
}

#[test]
fn edge_compact_without_empties() {
    let mut slots = vec![1, 2, 3];
    compact(&mut slots, &[]);
    assert_eq!(slots, vec![1, 2, 3]);
}

#[test]
fn edge_sample_of_single_identity() {
    let (m, init) =
        RegistryStateManager::initialize_with(1, 1, KeySeed::default(), SimRng::from_seed(3), 1)
            .unwrap();
    let only = m.active()[0].address();
    assert_eq!(init.checks.sample.first.address, only);
    assert_eq!(init.checks.sample.middle.address, only);
    assert_eq!(init.checks.sample.last.address, only);
}

#[test]
fn edge_initial_root_commits_all_identities() {
    let ids = identities(5);
    let root = derive_root(&Hash32::ZERO, 77, &ids, &Bitmap::new(0));
    let other = derive_root(&Hash32::ZERO, 77, &ids[..4], &Bitmap::new(0));
    assert_ne!(root, other);
}
