//! Roll and verification counters.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use fairdice_types::{VerificationOutcome, VerificationVerdict};

/// Thread-safe counters kept by the engine.
#[derive(Debug, Default)]
pub struct RollStats {
    rolls: AtomicU64,
    failed_rolls: AtomicU64,
    fallback_rounds: AtomicU64,
    refetches: AtomicU64,
    verifications: AtomicU64,
    remote_verdicts: AtomicU64,
    local_verdicts: AtomicU64,
    rejected_verdicts: AtomicU64,
}

/// A point-in-time copy of [`RollStats`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub rolls: u64,
    pub failed_rolls: u64,
    pub fallback_rounds: u64,
    pub refetches: u64,
    pub verifications: u64,
    pub remote_verdicts: u64,
    pub local_verdicts: u64,
    pub rejected_verdicts: u64,
}

impl RollStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_roll(&self) {
        self.rolls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed_roll(&self) {
        self.failed_rolls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_round(&self) {
        self.fallback_rounds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_refetch(&self) {
        self.refetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_verdict(&self, verdict: &VerificationVerdict) {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        match verdict.outcome {
            Some(VerificationOutcome::Remote(_)) => {
                self.remote_verdicts.fetch_add(1, Ordering::Relaxed);
            }
            Some(VerificationOutcome::LocalFallback(_)) => {
                self.local_verdicts.fetch_add(1, Ordering::Relaxed);
            }
            None => {}
        }
        if !verdict.valid {
            self.rejected_verdicts.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rolls: self.rolls.load(Ordering::Relaxed),
            failed_rolls: self.failed_rolls.load(Ordering::Relaxed),
            fallback_rounds: self.fallback_rounds.load(Ordering::Relaxed),
            refetches: self.refetches.load(Ordering::Relaxed),
            verifications: self.verifications.load(Ordering::Relaxed),
            remote_verdicts: self.remote_verdicts.load(Ordering::Relaxed),
            local_verdicts: self.local_verdicts.load(Ordering::Relaxed),
            rejected_verdicts: self.rejected_verdicts.load(Ordering::Relaxed),
        }
    }
}
