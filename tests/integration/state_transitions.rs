//! Integration test: the reference transition sequence at full scale,
//! starting from 2000 identities.

use identity_relay::{quorum, run_scenario, standard_scenario, RegistryStateManager, RelayConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn transitions_at_population_2000() {
    init_logging();
    let config = RelayConfig::default();
    let (mut manager, init) = RegistryStateManager::initialize(&config).expect("initialize");
    let h = config.initial_height;

    assert_eq!(init.height, h);
    assert_eq!(init.identities.len(), 2000);
    assert_eq!(init.checks.population, 2000);
    assert_eq!(manager.population(), 2000);

    // no membership change, height moves forward
    let signers = quorum(2000) + 1;
    let r1 = manager
        .apply_transition(h + 1, 0, 0, signers, true)
        .expect("empty change");
    assert!(r1.accepted());
    assert_eq!(manager.population(), 2000);
    assert_eq!(manager.height(), h + 1);
    assert_eq!(r1.remove_flags.count(), 0);
    assert_eq!(r1.remove_flags.as_bytes().len(), 250);
    assert_eq!(r1.sign_flags.count(), signers);

    // -100 +120
    let r2 = manager
        .apply_transition(h + 2, 100, 120, quorum(2000) + 1, true)
        .expect("grow");
    assert!(r2.accepted());
    assert_eq!(manager.population(), 2020);
    assert_eq!(manager.height(), h + 2);
    assert_eq!(r2.new_identities.len(), 120);
    assert_eq!(r2.remove_flags.count(), 100);
    let root_after_growth = manager.root();

    // same height again: rejected, nothing changes
    let r3 = manager
        .apply_transition(h + 2, 100, 120, quorum(2020) + 1, false)
        .expect("stale height");
    assert!(!r3.accepted());
    assert_eq!(manager.population(), 2020);
    assert_eq!(manager.height(), h + 2);
    assert_eq!(manager.root(), root_after_growth);
    // the record still carries the attempted change
    assert_eq!(r3.new_identities.len(), 120);
    assert_eq!(r3.remove_flags.len(), 2020);
    assert_eq!(r3.checks.root, root_after_growth);
}

#[test]
#[ignore = "full-scale BLS signing; run with --release -- --ignored"]
fn standard_scenario_at_population_2000() {
    init_logging();
    let config = RelayConfig::default();
    let requests = standard_scenario();
    let fixture = run_scenario(&config, &requests).expect("standard scenario");
    assert_eq!(fixture.updates.len(), requests.len());

    let mut population = config.initial_population;
    let mut height = config.initial_height;
    for (request, record) in requests.iter().zip(&fixture.updates) {
        assert_eq!(record.accepted(), request.expect_accepted, "{}", record.comment);
        if request.expect_accepted {
            population = population - request.remove + request.add;
            height = record.height;
        }
        assert_eq!(record.checks.population, population, "{}", record.comment);
        assert_eq!(record.checks.height, height, "{}", record.comment);
    }

    let last = fixture.updates.last().expect("updates");
    assert_eq!(last.checks.population, 2027);
    assert_eq!(last.checks.height, config.initial_height + 13);
}
