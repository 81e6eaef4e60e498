//! Nullable beacon: an in-process HTTP server standing in for the real beacon.
//!
//! Binds to an ephemeral loopback port, serves whatever replies the test
//! configured, and records every verify request it receives.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fairdice_types::RandomnessRound;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Reply to `GET /v1/randomness/latest`.
#[derive(Clone, Debug)]
pub enum LatestReply {
    Round(RandomnessRound),
    /// Respond with this status and an empty body.
    Status(u16),
    /// Respond 200 with this raw body.
    Raw(String),
    /// Serve the round only after the delay.
    Delayed(RandomnessRound, Duration),
    /// Accept the request and never answer.
    Hang,
}

/// Reply to `POST /v1/verify/{round}`.
#[derive(Clone, Debug)]
pub enum VerifyReply {
    Valid(bool),
    /// Respond 200 with `{}`.
    MissingField,
    /// Respond with this status and an empty body.
    Status(u16),
    /// Respond 200 with this raw body.
    Raw(String),
    /// Accept the request and never answer.
    Hang,
}

/// A verify request as received by the null beacon.
#[derive(Clone, Debug)]
pub struct RecordedVerify {
    pub path_round: u64,
    pub body: Value,
}

struct BeaconState {
    /// Replies served in order; the last one repeats forever.
    latest: Mutex<VecDeque<LatestReply>>,
    verify: Mutex<VerifyReply>,
    verify_requests: Mutex<Vec<RecordedVerify>>,
    fetches: AtomicUsize,
}

/// A running fake beacon. The server stops when this is dropped.
pub struct NullBeacon {
    addr: SocketAddr,
    state: Arc<BeaconState>,
    handle: JoinHandle<()>,
}

impl NullBeacon {
    /// Start a beacon that answers 503 to everything until configured.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(BeaconState {
            latest: Mutex::new(VecDeque::from([LatestReply::Status(503)])),
            verify: Mutex::new(VerifyReply::Status(503)),
            verify_requests: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/v1/randomness/latest", get(latest_handler))
            .route("/v1/verify/:round", post(verify_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Start a beacon already serving `round` and answering verify with `valid`.
    pub async fn serving(round: RandomnessRound, valid: bool) -> std::io::Result<Self> {
        let beacon = Self::start().await?;
        beacon.set_latest(round);
        beacon.set_verify(VerifyReply::Valid(valid));
        Ok(beacon)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve `round` for every subsequent fetch.
    pub fn set_latest(&self, round: RandomnessRound) {
        self.set_latest_replies(vec![LatestReply::Round(round)]);
    }

    /// Serve `replies` in order; the last one repeats.
    pub fn set_latest_replies(&self, replies: Vec<LatestReply>) {
        *self.state.latest.lock().unwrap() = replies.into();
    }

    pub fn set_verify(&self, reply: VerifyReply) {
        *self.state.verify.lock().unwrap() = reply;
    }

    /// Number of `GET /v1/randomness/latest` requests served.
    pub fn fetch_count(&self) -> usize {
        self.state.fetches.load(Ordering::SeqCst)
    }

    pub fn verify_requests(&self) -> Vec<RecordedVerify> {
        self.state.verify_requests.lock().unwrap().clone()
    }
}

impl Drop for NullBeacon {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A loopback URL on which nothing is listening.
pub fn unreachable_beacon_url() -> String {
    // Bind then release an ephemeral port so the address is known to be closed.
    let port = StdTcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .unwrap_or(9);
    format!("http://127.0.0.1:{port}")
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn latest_handler(State(state): State<Arc<BeaconState>>) -> Response {
    let reply = {
        let mut replies = state.latest.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    };
    // counted after the reply is claimed
    state.fetches.fetch_add(1, Ordering::SeqCst);
    match reply {
        Some(LatestReply::Round(round)) => Json(round).into_response(),
        Some(LatestReply::Status(code)) => status(code).into_response(),
        Some(LatestReply::Raw(body)) => (StatusCode::OK, body).into_response(),
        Some(LatestReply::Delayed(round, delay)) => {
            tokio::time::sleep(delay).await;
            Json(round).into_response()
        }
        Some(LatestReply::Hang) => std::future::pending().await,
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn verify_handler(
    State(state): State<Arc<BeaconState>>,
    Path(round): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    state.verify_requests.lock().unwrap().push(RecordedVerify {
        path_round: round,
        body,
    });
    let reply = state.verify.lock().unwrap().clone();
    match reply {
        VerifyReply::Valid(valid) => Json(serde_json::json!({ "valid": valid })).into_response(),
        VerifyReply::MissingField => Json(serde_json::json!({})).into_response(),
        VerifyReply::Status(code) => status(code).into_response(),
        VerifyReply::Raw(body) => (StatusCode::OK, body).into_response(),
        VerifyReply::Hang => std::future::pending().await,
    }
}
