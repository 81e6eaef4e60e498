//! A single published unit of beacon randomness.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Signature prefix carried by locally generated fallback rounds.
pub const DEMO_SIGNATURE_PREFIX: &str = "demo_signature_";

/// Threshold-proof prefix carried by locally generated fallback rounds.
pub const DEMO_THRESHOLD_PROOF_PREFIX: &str = "demo_threshold_proof_";

/// Number of hex characters shown by [`RandomnessRound::short_randomness`].
const SHORT_RANDOMNESS_CHARS: usize = 32;

/// A beacon round as published by `GET /v1/randomness/latest`.
///
/// Rounds are immutable once created. A round whose `randomness` is not valid
/// hex is kept as received, but can never be converted into a die face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomnessRound {
    /// Round number, increasing within a beacon epoch.
    pub round: u64,
    /// Hex-encoded raw entropy bytes.
    pub randomness: String,
    /// Network-specific signature encoding.
    pub signature: String,
    /// Attestation that a quorum of the committee co-signed the round.
    #[serde(default)]
    pub threshold_proof: Option<String>,
    /// Identifier of the signing committee.
    #[serde(default)]
    pub committee_id: Option<String>,
    /// Seconds since epoch when the round was produced.
    pub unix_time: u64,
}

impl RandomnessRound {
    /// Whether this round was generated locally while the beacon was unreachable.
    pub fn is_demo(&self) -> bool {
        self.signature.starts_with(DEMO_SIGNATURE_PREFIX)
            || self
                .threshold_proof
                .as_deref()
                .is_some_and(|p| p.starts_with(DEMO_THRESHOLD_PROOF_PREFIX))
    }

    /// Round numbers start at 1; zero marks a malformed round.
    pub fn has_valid_round(&self) -> bool {
        self.round > 0
    }

    pub fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.unix_time)
    }

    /// Leading randomness characters followed by `...`, for display.
    pub fn short_randomness(&self) -> String {
        let mut chars = self.randomness.chars();
        let prefix: String = chars.by_ref().take(SHORT_RANDOMNESS_CHARS).collect();
        if chars.next().is_some() {
            format!("{prefix}...")
        } else {
            prefix
        }
    }
}
