//! Stress test: rejected transitions leave the committed state untouched,
//! and the acceptance rule depends only on height and signer count.

use identity_relay::{quorum, KeySeed, RegistryStateManager, RelayError, SimRng};
use proptest::prelude::*;

const BASE_HEIGHT: u64 = 1_000;

fn manager(population: usize, seed: u64) -> RegistryStateManager {
    RegistryStateManager::initialize_with(
        BASE_HEIGHT,
        population,
        KeySeed::default(),
        SimRng::from_seed(seed),
        population,
    )
    .expect("initialize")
    .0
}

#[test]
fn stress_alternating_rejections() {
    let mut m = manager(30, 5);
    for round in 0..20u64 {
        let committed = m.snapshot();
        let stale = m.height();
        let record = m
            .apply_transition(stale, 4, 3, m.population(), false)
            .expect("stale transition");
        assert!(!record.accepted());
        assert_eq!(m.height(), committed.height(), "round {round}");
        assert_eq!(m.root(), committed.root(), "round {round}");
        assert_eq!(m.active(), committed.registry().members(), "round {round}");

        let population = m.population();
        let record = m
            .apply_transition(stale + 1, 3, 4, quorum(population), true)
            .expect("fresh transition");
        assert!(record.accepted());
        assert_eq!(m.population(), population + 1);
    }
}

#[test]
fn rejected_record_describes_attempt() {
    let mut m = manager(25, 6);
    let committed_root = m.root();
    let record = m
        .apply_transition(BASE_HEIGHT + 1, 5, 8, quorum(25) - 1, false)
        .unwrap();
    assert_eq!(record.new_identities.len(), 8);
    assert_eq!(record.remove_flags.count(), 5);
    assert_eq!(record.sign_flags.count(), quorum(25) - 1);
    assert_eq!(record.checks.root, committed_root);
    assert!(!record.checks.valid);
    // rejected additions never became active
    for address in &record.new_identities {
        assert!(!m.active().iter().any(|id| id.address() == *address));
    }
}

#[test]
fn self_check_failures_are_errors() {
    let mut m = manager(10, 7);
    let err = m.apply_transition(BASE_HEIGHT + 1, 0, 0, 11, true).unwrap_err();
    assert!(matches!(err, RelayError::InvalidSignerCount { requested: 11, population: 10 }));
    assert_eq!(m.height(), BASE_HEIGHT);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_acceptance_rule(
        height_delta in -3i64..=3,
        signer_offset in -3i64..=3,
        remove in 0usize..=4,
        add in 0usize..=4,
        seed in any::<u64>(),
    ) {
        let population = 9usize;
        let mut m = manager(population, seed);
        let before = m.snapshot();

        let height = (BASE_HEIGHT as i64 + height_delta) as u64;
        let signers = (quorum(population) as i64 + signer_offset).clamp(1, population as i64) as usize;
        let expected = height > BASE_HEIGHT && signers >= quorum(population);

        let record = m.apply_transition(height, remove, add, signers, expected).unwrap();
        prop_assert_eq!(record.accepted(), expected);

        if expected {
            prop_assert_eq!(m.height(), height);
            prop_assert_eq!(m.population(), population - remove + add);
        } else {
            prop_assert_eq!(m.height(), before.height());
            prop_assert_eq!(m.root(), before.root());
            prop_assert_eq!(m.active(), before.registry().members());
            prop_assert_eq!(m.population(), population);
        }
    }
}
