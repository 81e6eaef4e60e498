//! End-to-end rolls against the null beacon: fetch → convert → record → verify.

use std::sync::Arc;
use std::time::Duration;

use fairdice_engine::{DiceConfig, EngineError, ExhaustionPolicy, RollEngine};
use fairdice_nullables::{LatestReply, NullBeacon, NullClock, NullEntropy};
use fairdice_types::{RandomnessRound, VerificationOutcome};
use fairdice_vrf::{BeaconClient, BeaconSource, ProofVerifier, VrfError};

fn round_with(round: u64, randomness: String) -> RandomnessRound {
    RandomnessRound {
        round,
        randomness,
        signature: "b1c2d3e4f5a6b7c8d9e0".to_string(),
        threshold_proof: Some("tp_committee_quorum".to_string()),
        committee_id: Some("committee_12".to_string()),
        unix_time: 1_700_000_000 + round,
    }
}

fn distinct_hex(first: u8) -> String {
    std::iter::once(first)
        .chain((1u8..32).map(|b| b.wrapping_mul(5)))
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn engine_for(beacon: &NullBeacon, config: DiceConfig) -> RollEngine {
    let config = DiceConfig {
        beacon_url: beacon.base_url(),
        request_timeout_secs: 2,
        ..config
    };
    let client = BeaconClient::with_url(&config.beacon_url).with_timeout(config.request_timeout());
    let source = BeaconSource::new(client.clone())
        .with_entropy(Arc::new(NullEntropy::counting()))
        .with_clock(Arc::new(NullClock::new(1_750_000_000)));
    RollEngine::new(source, ProofVerifier::new(client), &config).unwrap()
}

#[tokio::test]
async fn beacon_round_becomes_roll_record() {
    // 0x0b = 11 → 11 % 6 = 5 → face 6
    let round = round_with(100, distinct_hex(0x0b));
    let beacon = NullBeacon::serving(round.clone(), true).await.unwrap();
    let engine = engine_for(&beacon, DiceConfig::default());

    let record = engine.roll().await.unwrap();
    assert_eq!(record.dice, 6);
    assert_eq!(record.round, round);
    assert_eq!(record.timestamp.as_secs(), 1_700_000_100);
    assert!(!record.is_demo());
    assert_eq!(engine.stats().fallback_rounds, 0);

    let verdict = engine.verify_current().await.unwrap();
    assert!(verdict.valid);
    assert_eq!(verdict.outcome, Some(VerificationOutcome::Remote(true)));
    assert_eq!(beacon.verify_requests()[0].path_round, 100);
}

#[tokio::test]
async fn malformed_randomness_fails_the_roll_without_recording() {
    let beacon = NullBeacon::serving(round_with(7, "zz11".into()), true)
        .await
        .unwrap();
    let engine = engine_for(&beacon, DiceConfig::default());

    let err = engine.roll().await.unwrap_err();
    assert!(err.is_malformed_round());
    assert!(matches!(err, EngineError::Vrf(VrfError::MalformedInput(_))));
    assert!(engine.history().await.is_empty());
    assert!(matches!(
        engine.verify_current().await,
        Err(EngineError::NoRoll)
    ));
    assert_eq!(engine.stats().failed_rolls, 1);
}

#[tokio::test]
async fn exhausted_randomness_uses_first_byte_by_default() {
    let beacon = NullBeacon::serving(round_with(8, "ff".repeat(32)), true)
        .await
        .unwrap();
    let engine = engine_for(&beacon, DiceConfig::default());

    let record = engine.roll().await.unwrap();
    assert_eq!(record.dice, 4);
    assert_eq!(beacon.fetch_count(), 1);
}

#[tokio::test]
async fn refetch_policy_fetches_another_round() {
    let beacon = NullBeacon::start().await.unwrap();
    beacon.set_latest_replies(vec![
        LatestReply::Round(round_with(9, "fe".repeat(32))),
        LatestReply::Round(round_with(10, distinct_hex(0x02))),
    ]);
    let engine = engine_for(
        &beacon,
        DiceConfig {
            on_exhausted: ExhaustionPolicy::Refetch,
            ..DiceConfig::default()
        },
    );

    let record = engine.roll().await.unwrap();
    assert_eq!(record.round.round, 10);
    assert_eq!(record.dice, 3);
    assert_eq!(beacon.fetch_count(), 2);
    assert_eq!(engine.stats().refetches, 1);
}

#[tokio::test]
async fn refetch_gives_up_after_configured_attempts() {
    let beacon = NullBeacon::serving(round_with(11, "ff".repeat(32)), true)
        .await
        .unwrap();
    let engine = engine_for(
        &beacon,
        DiceConfig {
            on_exhausted: ExhaustionPolicy::Refetch,
            max_refetch_attempts: 2,
            ..DiceConfig::default()
        },
    );

    let record = engine.roll().await.unwrap();
    assert_eq!(record.dice, 4);
    assert_eq!(beacon.fetch_count(), 3);
    assert_eq!(engine.stats().refetches, 2);
}

#[tokio::test]
async fn beacon_outage_mid_session_falls_back_per_roll() {
    let beacon = NullBeacon::start().await.unwrap();
    beacon.set_latest_replies(vec![
        LatestReply::Round(round_with(20, distinct_hex(0x00))),
        LatestReply::Status(503),
    ]);
    let engine = engine_for(&beacon, DiceConfig::default());

    let first = engine.roll().await.unwrap();
    let second = engine.roll().await.unwrap();
    assert!(!first.is_demo());
    assert!(second.is_demo());

    let history = engine.history().await;
    assert_eq!(history[0], second);
    assert_eq!(history[1], first);
    assert_eq!(engine.stats().fallback_rounds, 1);
}

#[tokio::test]
async fn slow_earlier_roll_does_not_replace_newer_current() {
    let slow = round_with(30, distinct_hex(0x01));
    let fast = round_with(31, distinct_hex(0x03));
    let beacon = NullBeacon::start().await.unwrap();
    beacon.set_latest_replies(vec![
        LatestReply::Delayed(slow.clone(), Duration::from_millis(400)),
        LatestReply::Round(fast.clone()),
    ]);
    let engine = engine_for(&beacon, DiceConfig::default());

    let first = engine.roll();
    let second = async {
        // start only once the first roll's request holds the slow reply
        while beacon.fetch_count() < 1 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        engine.roll().await
    };
    let (first, second) = tokio::join!(first, second);
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_eq!(first.round, slow);
    assert_eq!(second.round, fast);

    assert_eq!(engine.current().await, Some(second.clone()));
    assert_eq!(engine.history().await, vec![second, first]);
}
