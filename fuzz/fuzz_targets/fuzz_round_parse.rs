#![no_main]

use fairdice_types::{RandomnessRound, RollRecord};
use libfuzzer_sys::fuzz_target;

// Parse arbitrary bytes as beacon responses; helpers on parsed rounds never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(round) = serde_json::from_slice::<RandomnessRound>(data) {
        let _ = round.is_demo();
        let _ = round.has_valid_round();
        let short = round.short_randomness();
        assert!(short.chars().count() <= 35);

        let record = RollRecord::from_round(round.clone(), 1);
        let json = serde_json::to_vec(&record).unwrap();
        let back: RollRecord = serde_json::from_slice(&json).unwrap();
        assert_eq!(back.round, round);
    }
});
