//! The roll engine.
//!
//! A roll runs `source → converter → record`: fetch the latest round (or its
//! local fallback), turn its randomness into a face, then store the record.
//! The history and the "current roll" slot share one lock; beacon I/O never
//! happens while it is held.
//!
//! Every roll takes an increasing id before it starts fetching. A roll that
//! completes after a newer one is still recorded in history, but does not
//! replace the newer roll as the verification target.

use std::sync::atomic::{AtomicU64, Ordering};

use fairdice_types::{RandomnessRound, RollRecord, VerificationVerdict};
use fairdice_vrf::{convert, BeaconClient, BeaconSource, ProofVerifier, RoundOrigin, VrfError};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{DiceConfig, EngineError, ExhaustionPolicy, RollHistory, RollStats, StatsSnapshot};

struct EngineState {
    current: Option<(u64, RollRecord)>,
    history: RollHistory,
}

pub struct RollEngine {
    source: BeaconSource,
    verifier: ProofVerifier,
    sides: u32,
    on_exhausted: ExhaustionPolicy,
    max_refetch_attempts: u32,
    next_roll_id: AtomicU64,
    state: Mutex<EngineState>,
    stats: RollStats,
}

impl RollEngine {
    /// Build an engine from explicit components.
    pub fn new(
        source: BeaconSource,
        verifier: ProofVerifier,
        config: &DiceConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            source,
            verifier,
            sides: config.sides,
            on_exhausted: config.on_exhausted,
            max_refetch_attempts: config.max_refetch_attempts,
            next_roll_id: AtomicU64::new(0),
            state: Mutex::new(EngineState {
                current: None,
                history: RollHistory::new(config.history_capacity),
            }),
            stats: RollStats::new(),
        })
    }

    /// Build an engine talking to the configured beacon.
    pub fn from_config(config: &DiceConfig) -> Result<Self, EngineError> {
        let client =
            BeaconClient::with_url(&config.beacon_url).with_timeout(config.request_timeout());
        Self::new(
            BeaconSource::new(client.clone()),
            ProofVerifier::new(client),
            config,
        )
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Roll once and record the result.
    ///
    /// Fails only when the round's randomness cannot be converted (or when
    /// neither the beacon nor local entropy is available); the caller may retry.
    pub async fn roll(&self) -> Result<RollRecord, EngineError> {
        let roll_id = self.next_roll_id.fetch_add(1, Ordering::SeqCst) + 1;

        let (round, dice) = match self.produce().await {
            Ok(produced) => produced,
            Err(e) => {
                self.stats.record_failed_roll();
                error!(roll_id, error = %e, "roll failed");
                return Err(e);
            }
        };

        let record = RollRecord::from_round(round, dice);
        self.apply(roll_id, record.clone()).await;
        self.stats.record_roll();
        info!(
            roll_id,
            dice = record.dice,
            round = record.round.round,
            demo = record.is_demo(),
            "roll complete"
        );
        Ok(record)
    }

    /// Fetch a round and derive a face from it, honouring the exhaustion policy.
    async fn produce(&self) -> Result<(RandomnessRound, u32), EngineError> {
        let mut round = self.fetch().await?;

        if self.on_exhausted == ExhaustionPolicy::FirstByte {
            let dice = convert::face(&round.randomness, self.sides)?;
            return Ok((round, dice));
        }

        let mut attempts = 0;
        loop {
            match convert::draw_strict(&round.randomness, self.sides) {
                Ok(v) => return Ok((round, v + 1)),
                Err(VrfError::EntropyExhausted { .. }) if attempts < self.max_refetch_attempts => {
                    attempts += 1;
                    self.stats.record_refetch();
                    warn!(
                        round = round.round,
                        attempt = attempts,
                        "no byte below rejection threshold, fetching another round"
                    );
                    round = self.fetch().await?;
                }
                Err(VrfError::EntropyExhausted { .. }) => {
                    warn!(
                        round = round.round,
                        attempts, "refetch attempts exhausted, accepting first-byte fallback"
                    );
                    let dice = convert::face(&round.randomness, self.sides)?;
                    return Ok((round, dice));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn fetch(&self) -> Result<RandomnessRound, EngineError> {
        let (round, origin) = self.source.latest_with_origin().await?;
        if origin == RoundOrigin::LocalFallback {
            self.stats.record_fallback_round();
        }
        Ok(round)
    }

    /// Record a completed roll; only a newer roll replaces the current slot.
    async fn apply(&self, roll_id: u64, record: RollRecord) {
        let mut state = self.state.lock().await;
        state.history.insert(roll_id, record.clone());
        let newer = state
            .current
            .as_ref()
            .map_or(true, |(current_id, _)| roll_id > *current_id);
        if newer {
            state.current = Some((roll_id, record));
        } else {
            debug!(roll_id, "roll completed after a newer one; current roll unchanged");
        }
    }

    /// Verify the most recent roll.
    pub async fn verify_current(&self) -> Result<VerificationVerdict, EngineError> {
        let current = {
            let state = self.state.lock().await;
            state.current.as_ref().map(|(_, record)| record.clone())
        };
        let record = current.ok_or(EngineError::NoRoll)?;
        Ok(self.verify_round(&record.round).await)
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

    /// Verify round material supplied by a third party.
    pub async fn verify(
        &self,
        round: u64,
        signature: &str,
        threshold_proof: Option<&str>,
        randomness: &str,
    ) -> VerificationVerdict {
        let verdict = self
            .verifier
            .verify(round, signature, threshold_proof, randomness)
            .await;
        self.stats.record_verdict(&verdict);
        info!(
            round,
            valid = verdict.valid,
            reason = verdict.reason.as_deref().unwrap_or(""),
            "verification finished"
        );
        verdict
    }

    pub async fn current(&self) -> Option<RollRecord> {
        let state = self.state.lock().await;
        state.current.as_ref().map(|(_, record)| record.clone())
    }

    /// Recent rolls, most recent first.
    pub async fn history(&self) -> Vec<RollRecord> {
        self.state.lock().await.history.records()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
