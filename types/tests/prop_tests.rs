use proptest::prelude::*;

use fairdice_types::{RandomnessRound, RollRecord, Timestamp, DEMO_SIGNATURE_PREFIX};

fn round(randomness: String, signature: String, unix_time: u64) -> RandomnessRound {
    RandomnessRound {
        round: 1,
        randomness,
        signature,
        threshold_proof: None,
        committee_id: None,
        unix_time,
    }
}

proptest! {
    /// Timestamp ordering matches the underlying seconds.
    #[test]
    fn timestamp_ordering_consistent(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta < tb, a < b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// elapsed_since never underflows.
    #[test]
    fn elapsed_since_saturates(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let elapsed = Timestamp::new(a).elapsed_since(Timestamp::new(b));
        prop_assert_eq!(elapsed, b.saturating_sub(a));
    }

    /// Long randomness is cut to 32 characters plus "..."; short randomness is shown whole.
    #[test]
    fn short_randomness_is_a_prefix(randomness in ".{0,100}") {
        let r = round(randomness.clone(), "sig".into(), 0);
        let short = r.short_randomness();
        if randomness.chars().count() > 32 {
            let prefix: String = randomness.chars().take(32).collect();
            prop_assert_eq!(short, format!("{prefix}..."));
        } else {
            prop_assert_eq!(short, randomness);
        }
    }

    /// Any signature carrying the demo prefix marks the round as local.
    #[test]
    fn demo_prefix_marks_round(suffix in "[0-9a-f]{0,16}", other in "[0-9a-f]{10,40}") {
        let demo = round("00".into(), format!("{DEMO_SIGNATURE_PREFIX}{suffix}"), 0);
        let real = round("00".into(), other, 0);
        prop_assert!(demo.is_demo());
        prop_assert!(!real.is_demo());
    }

    /// A record's timestamp is the round's publication time.
    #[test]
    fn record_takes_round_time(unix_time in 0u64..u64::MAX, dice in 1u32..=6) {
        let record = RollRecord::from_round(round("00".into(), "sig".into(), unix_time), dice);
        prop_assert_eq!(record.timestamp, Timestamp::new(unix_time));
        prop_assert_eq!(record.dice, dice);
    }
}
