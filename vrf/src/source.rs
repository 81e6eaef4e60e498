//! Randomness source: the beacon's latest round, or a local substitute.
//!
//! A single failed fetch switches to local generation immediately; there are
//! no retries. Local rounds carry the demo markers on their signature and
//! threshold proof so verification can recognise them.

use std::sync::Arc;

use fairdice_types::{
    Clock, EntropySource, RandomnessRound, SystemClock, DEMO_SIGNATURE_PREFIX,
    DEMO_THRESHOLD_PROOF_PREFIX,
};
use tracing::warn;

use crate::{BeaconClient, OsEntropy, VrfError};

/// Bytes of entropy in a locally generated round.
pub const LOCAL_RANDOMNESS_BYTES: usize = 32;

/// Bytes of entropy spent on each demo tag suffix.
const DEMO_TAG_BYTES: usize = 4;

/// Number of distinct committee ids a local round can claim.
const DEMO_COMMITTEES: u8 = 100;

/// Where a round came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOrigin {
    Beacon,
    LocalFallback,
}

/// Fetches beacon rounds, substituting local rounds when the beacon is down.
#[derive(Clone)]
pub struct BeaconSource {
    client: BeaconClient,
    entropy: Arc<dyn EntropySource>,
    clock: Arc<dyn Clock>,
}

impl BeaconSource {
    /// Source backed by OS entropy and the system clock.
    pub fn new(client: BeaconClient) -> Self {
        Self {
            client,
            entropy: Arc::new(OsEntropy),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn client(&self) -> &BeaconClient {
        &self.client
    }

    /// The latest round, from the beacon if reachable.
    ///
    /// Fails only when the beacon is unreachable *and* local entropy is unavailable.
    pub async fn latest(&self) -> Result<RandomnessRound, VrfError> {
        self.latest_with_origin().await.map(|(round, _)| round)
    }

    /// Like [`BeaconSource::latest`], also reporting which path produced the round.
    pub async fn latest_with_origin(&self) -> Result<(RandomnessRound, RoundOrigin), VrfError> {
        match self.client.fetch_latest().await {
            Ok(round) => Ok((round, RoundOrigin::Beacon)),
            Err(e) => {
                warn!(
                    error = %e,
                    beacon = self.client.base_url(),
                    entropy = self.entropy.name(),
                    "beacon unavailable, generating local fallback round"
                );
                let round = self.generate_local()?;
                Ok((round, RoundOrigin::LocalFallback))
            }
        }
    }

    /// Build an unverifiable round from local entropy.
    pub fn generate_local(&self) -> Result<RandomnessRound, VrfError> {
        let mut randomness = [0u8; LOCAL_RANDOMNESS_BYTES];
        self.entropy.fill(&mut randomness)?;

        let mut tags = [0u8; 2 * DEMO_TAG_BYTES + 1];
        self.entropy.fill(&mut tags)?;
        let (sig_tag, rest) = tags.split_at(DEMO_TAG_BYTES);
        let (proof_tag, committee) = rest.split_at(DEMO_TAG_BYTES);

        let now = self.clock.now().as_secs();
        Ok(RandomnessRound {
            round: now,
            randomness: hex::encode(randomness),
            signature: format!("{DEMO_SIGNATURE_PREFIX}{}", hex::encode(sig_tag)),
            threshold_proof: Some(format!(
                "{DEMO_THRESHOLD_PROOF_PREFIX}{}",
                hex::encode(proof_tag)
            )),
            committee_id: Some(format!("committee_{}", committee[0] % DEMO_COMMITTEES)),
            unix_time: now,
        })
    }
}
