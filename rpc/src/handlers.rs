//! RPC request handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use fairdice_engine::{RollEngine, StatsSnapshot};
use fairdice_types::{RollRecord, VerificationVerdict};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RpcError;

pub type SharedEngine = Arc<RollEngine>;

// ── Roll ─────────────────────────────────────────────────────────────────

pub async fn roll(State(engine): State<SharedEngine>) -> Result<Json<RollRecord>, RpcError> {
    let record = engine.roll().await?;
    Ok(Json(record))
}

// ── Verification ─────────────────────────────────────────────────────────

pub async fn verify_current(
    State(engine): State<SharedEngine>,
) -> Result<Json<VerificationVerdict>, RpcError> {
    let verdict = engine.verify_current().await?;
    Ok(Json(verdict))
}

/// Round material a third party wants confirmed.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRoundRequest {
    pub round: u64,
    pub signature: String,
    #[serde(default)]
    pub threshold_proof: Option<String>,
    pub randomness: String,
}

pub async fn verify_round(
    State(engine): State<SharedEngine>,
    Json(req): Json<VerifyRoundRequest>,
) -> Json<VerificationVerdict> {
    debug!(round = req.round, "verifying externally supplied round");
    let verdict = engine
        .verify(
            req.round,
            &req.signature,
            req.threshold_proof.as_deref(),
            &req.randomness,
        )
        .await;
    Json(verdict)
}

// ── History / stats ──────────────────────────────────────────────────────

pub async fn history(State(engine): State<SharedEngine>) -> Json<Vec<RollRecord>> {
    Json(engine.history().await)
}

pub async fn stats(State(engine): State<SharedEngine>) -> Json<StatsSnapshot> {
    Json(engine.stats())
}

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
