//! Round verification.
//!
//! Checks run strictly in order and stop at the first disqualifying result:
//!
//! 1. Signature format: non-empty, at least [`MIN_SIGNATURE_LEN`] characters.
//! 2. Threshold proof presence.
//! 3. Authenticity: the beacon's verify endpoint when reachable, otherwise
//!    local heuristics ([`verify_locally`]).
//! 4. Randomness properties: always run, regardless of which path answered
//!    step 3 ([`check_randomness_properties`]).
//!
//! The final verdict is `authenticity && randomness_ok`. Verification never
//! fails outward: an unreachable beacon degrades to the local path and every
//! other problem becomes a negative verdict with a reason.
//!
//! The local path and the threshold-proof check are placeholders for real
//! threshold-signature verification (BLS aggregation over the committee's
//! public keys). Demo-tagged signatures pass locally so that rounds produced by
//! [`crate::BeaconSource`]'s own fallback remain verifiable end to end.

use std::collections::HashSet;

use fairdice_types::{
    RandomnessRound, VerificationOutcome, VerificationVerdict, DEMO_SIGNATURE_PREFIX,
    DEMO_THRESHOLD_PROOF_PREFIX,
};
use tracing::{debug, warn};

use crate::convert::decode_randomness;
use crate::BeaconClient;

/// Shortest signature accepted by the format check.
pub const MIN_SIGNATURE_LEN: usize = 10;

/// Shortest randomness (hex characters) accepted by either entropy check.
pub const MIN_RANDOMNESS_HEX_LEN: usize = 32;

/// Distinct hex characters the local authenticity heuristic requires.
pub const MIN_DISTINCT_HEX_CHARS: usize = 8;

/// Verifies rounds against the beacon, falling back to local checks.
#[derive(Clone, Debug)]
pub struct ProofVerifier {
    client: BeaconClient,
}

impl ProofVerifier {
    pub fn new(client: BeaconClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &BeaconClient {
        &self.client
    }

    /// Verify a stored round.
    pub async fn verify_round(&self, round: &RandomnessRound) -> VerificationVerdict {
        self.verify(
            round.round,
            &round.signature,
            round.threshold_proof.as_deref(),
            &round.randomness,
        )
        .await
    }

    /// Decide whether a round's randomness, signature, and proof are authentic.
    pub async fn verify(
        &self,
        round: u64,
        signature: &str,
        threshold_proof: Option<&str>,
        randomness: &str,
    ) -> VerificationVerdict {
        if let Err(reason) = check_signature_format(signature) {
            debug!(round, reason, "signature rejected");
            return VerificationVerdict::rejected(reason);
        }

        let proof = match threshold_proof {
            Some(p) if !p.is_empty() => p,
            _ => {
                debug!(round, "threshold proof missing");
                return VerificationVerdict::rejected("missing threshold proof");
            }
        };
        if !proof.starts_with(DEMO_THRESHOLD_PROOF_PREFIX) {
            // TODO: aggregate committee public keys and check the proof once
            // the beacon publishes its committee key format.
            debug!(round, "threshold proof present; committee aggregation not performed");
        }

        let outcome = self.authenticity(round, signature, randomness).await;
        let randomness_ok = check_randomness_properties(randomness);

        let verdict = VerificationVerdict::from_checks(outcome, randomness_ok);
        debug!(
            round,
            valid = verdict.valid,
            degraded = outcome.is_degraded(),
            randomness_ok,
            "verification complete"
        );
        verdict
    }

    /// Ask the beacon; fall back to local heuristics if it cannot answer.
    async fn authenticity(
        &self,
        round: u64,
        signature: &str,
        randomness: &str,
    ) -> VerificationOutcome {
        match self.client.verify_remote(round, signature, randomness).await {
            Ok(valid) => VerificationOutcome::Remote(valid),
            Err(e) => {
                warn!(round, error = %e, "network verification unavailable, using local verification");
                VerificationOutcome::LocalFallback(verify_locally(round, signature, randomness))
            }
        }
    }
}

fn check_signature_format(signature: &str) -> Result<(), &'static str> {
    if signature.chars().count() < MIN_SIGNATURE_LEN {
        return Err("invalid signature format");
    }
    Ok(())
}

/// Local authenticity heuristic used only when the beacon is unreachable.
pub fn verify_locally(round: u64, signature: &str, randomness: &str) -> bool {
    if round == 0 || signature.is_empty() || randomness.is_empty() {
        return false;
    }
    if signature.contains(DEMO_SIGNATURE_PREFIX) {
        return true;
    }
    if randomness.len() < MIN_RANDOMNESS_HEX_LEN {
        return false;
    }
    let distinct: HashSet<char> = randomness.chars().collect();
    distinct.len() >= MIN_DISTINCT_HEX_CHARS
}

/// Coarse detector of degenerate randomness.
///
/// Requires at least [`MIN_RANDOMNESS_HEX_LEN`] hex characters that decode to
/// bytes of which at least half are distinct.
pub fn check_randomness_properties(randomness: &str) -> bool {
    if randomness.len() < MIN_RANDOMNESS_HEX_LEN {
        return false;
    }
    let bytes = match decode_randomness(randomness) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let distinct: HashSet<u8> = bytes.iter().copied().collect();
    distinct.len() * 2 >= bytes.len()
}
