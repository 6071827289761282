//! Integration test: scripted scenarios and verification vectors produce
//! consistent, serializable, reproducible records.

use identity_relay::scenario::apply_request;
use identity_relay::threshold::verify_aggregate;
use identity_relay::{
    generate_verify_vectors, run_scenario, HeightStep, RegistryStateManager, RelayConfig,
    SignerDemand, SimRng, TransitionRequest, VerifyCase,
};

fn small_config() -> RelayConfig {
    RelayConfig {
        initial_population: 60,
        rng_seed: 42,
        ..RelayConfig::default()
    }
}

/// The standard shape, scaled down so the active set stays above the
/// largest removal.
fn scaled_scenario() -> Vec<TransitionRequest> {
    use HeightStep::{Next, Previous, Same};
    vec![
        TransitionRequest::accepted(Next(1), 0, 0),
        TransitionRequest::accepted(Next(1), 10, 0),
        TransitionRequest::accepted(Next(2), 0, 10),
        TransitionRequest::accepted(Next(1), 12, 17),
        TransitionRequest::accepted(Next(2), 18, 14),
        TransitionRequest::accepted(Next(4), 21, 18),
        TransitionRequest::accepted(Next(1), 18, 20),
        TransitionRequest::rejected(Same, 10, 12, SignerDemand::Sufficient),
        TransitionRequest::rejected(Previous(1), 10, 12, SignerDemand::Sufficient),
        TransitionRequest::rejected(Next(1), 10, 12, SignerDemand::Insufficient),
        TransitionRequest::accepted(Next(1), 8, 11),
    ]
}

#[test]
fn scenario_records_are_consistent() {
    let fixture = run_scenario(&small_config(), &scaled_scenario()).expect("scenario");
    assert_eq!(fixture.updates.len(), 11);

    let mut population = fixture.init.checks.population;
    let mut height = fixture.init.height;
    for (update, request) in fixture.updates.iter().zip(scaled_scenario()) {
        assert_eq!(update.accepted(), request.expect_accepted, "{}", update.comment);
        assert_eq!(update.remove_flags.len(), population);
        assert_eq!(update.sign_flags.len(), population);
        if update.accepted() {
            population = population - request.remove + request.add;
            height = update.height;
        }
        assert_eq!(update.checks.population, population);
        assert_eq!(update.checks.height, height);
    }
}

#[test]
fn scenario_is_reproducible() {
    let a = run_scenario(&small_config(), &scaled_scenario()).unwrap();
    let b = run_scenario(&small_config(), &scaled_scenario()).unwrap();
    let ja = serde_json::to_string(&a).unwrap();
    let jb = serde_json::to_string(&b).unwrap();
    assert_eq!(ja, jb);

    let other_seed = RelayConfig {
        rng_seed: 43,
        ..small_config()
    };
    let c = run_scenario(&other_seed, &scaled_scenario()).unwrap();
    assert_ne!(ja, serde_json::to_string(&c).unwrap());
}

#[test]
fn records_serialize_with_contract_field_names() {
    let fixture = run_scenario(&small_config(), &scaled_scenario()[..1]).unwrap();
    let json = serde_json::to_value(&fixture).unwrap();

    let checks = &json["init"]["checks"];
    assert!(checks["root"].as_str().unwrap().starts_with("0x"));
    assert!(checks["firstId"]["address"].is_string());
    assert!(checks["middleId"]["accountKey"].is_string());
    assert_eq!(checks["lastId"]["pubKey"].as_array().unwrap().len(), 2);

    let update = &json["updates"][0];
    assert_eq!(update["apk2"].as_array().unwrap().len(), 4);
    assert_eq!(update["signature"].as_array().unwrap().len(), 2);
    assert!(update["removeFlags"].is_string());
    assert!(update["signFlags"].is_string());
    assert_eq!(update["newIdentities"].as_array().unwrap().len(), 0);
}

#[test]
fn transition_signature_covers_new_root() {
    let (mut manager, _) = RegistryStateManager::initialize(&small_config()).unwrap();
    let request = TransitionRequest::accepted(HeightStep::Next(1), 5, 7);
    let record = apply_request(&mut manager, &request).unwrap();
    assert!(verify_aggregate(
        manager.root().as_bytes(),
        &record.signature,
        &record.aggregate_key
    )
    .unwrap());
}

#[test]
fn verify_vectors_small_cases() {
    let cases = vec![
        VerifyCase::new(1, ""),
        VerifyCase::new(1, "idena go"),
        VerifyCase::new(2, "2 keys 1"),
        VerifyCase::new(4, "4 keys"),
    ];
    let vectors = generate_verify_vectors(&cases, &mut SimRng::from_seed(1)).unwrap();
    assert_eq!(vectors.len(), 4);
    assert_eq!(vectors[0].apk1, vectors[1].apk1);
    let json = serde_json::to_value(&vectors).unwrap();
    assert_eq!(json[3]["keys"], 4);
    assert_eq!(json[3]["apk2"].as_array().unwrap().len(), 4);
}
