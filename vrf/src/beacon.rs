//! HTTP client for the randomness beacon.
//!
//! Two endpoints are used:
//! - `GET  {base}/v1/randomness/latest`: the most recent published round.
//! - `POST {base}/v1/verify/{round}`: the beacon's own verdict on a round.
//!
//! Every request carries a timeout so a roll or verification always completes.

use std::time::Duration;

use fairdice_types::RandomnessRound;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::VrfError;

/// Default beacon base URL.
pub const DEFAULT_BEACON_URL: &str = "https://api.dcipher.network";

/// Default bound on each beacon request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of `POST /v1/verify/{round}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyRequest {
    pub signature: String,
    pub randomness: String,
    pub round: u64,
}

/// Response of `POST /v1/verify/{round}`. A missing `valid` reads as `false`.
#[derive(Debug, Clone, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    valid: Option<bool>,
}

/// Client for a beacon's HTTP API.
#[derive(Clone, Debug)]
pub struct BeaconClient {
    /// Base URL without trailing slash.
    base_url: String,
    /// Reusable HTTP client.
    client: reqwest::Client,
    /// Bound applied to every request.
    timeout: Duration,
}

impl BeaconClient {
    /// Create a client pointing at the default beacon.
    pub fn new() -> Self {
        Self::with_url(DEFAULT_BEACON_URL)
    }

    /// Create a client pointing at a custom beacon URL.
    pub fn with_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn latest_url(&self) -> String {
        format!("{}/v1/randomness/latest", self.base_url)
    }

    fn verify_url(&self, round: u64) -> String {
        format!("{}/v1/verify/{}", self.base_url, round)
    }

    /// Fetch the latest published round.
    pub async fn fetch_latest(&self) -> Result<RandomnessRound, VrfError> {
        let url = self.latest_url();
        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| VrfError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(VrfError::Fetch(format!(
                "HTTP {} from {}",
                resp.status(),
                url
            )));
        }

        let round: RandomnessRound = resp
            .json()
            .await
            .map_err(|e| VrfError::Fetch(e.to_string()))?;
        debug!(round = round.round, "fetched beacon round");
        Ok(round)
    }

    /// Ask the beacon whether a round is authentic.
    ///
    /// `Ok(valid)` only when the beacon answered with a 2xx JSON body; any
    /// transport failure, non-2xx status, or unparseable body is an error.
    pub async fn verify_remote(
        &self,
        round: u64,
        signature: &str,
        randomness: &str,
    ) -> Result<bool, VrfError> {
        let url = self.verify_url(round);
        let body = VerifyRequest {
            signature: signature.to_string(),
            randomness: randomness.to_string(),
            round,
        };
        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| VrfError::Verify(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(VrfError::Verify(format!(
                "HTTP {} from {}",
                resp.status(),
                url
            )));
        }

        let parsed: VerifyResponse = resp
            .json()
            .await
            .map_err(|e| VrfError::Verify(e.to_string()))?;
        Ok(parsed.valid.unwrap_or(false))
    }
}

impl Default for BeaconClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_points_at_beacon() {
        let client = BeaconClient::new();
        assert_eq!(client.base_url(), DEFAULT_BEACON_URL);
        assert_eq!(client.timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn custom_url_trims_trailing_slash() {
        let client = BeaconClient::with_url("http://127.0.0.1:9000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(
            client.latest_url(),
            "http://127.0.0.1:9000/v1/randomness/latest"
        );
        assert_eq!(client.verify_url(42), "http://127.0.0.1:9000/v1/verify/42");
    }

    #[tokio::test]
    async fn unreachable_beacon_is_a_fetch_error() {
        let client = BeaconClient::with_url(&fairdice_nullables::unreachable_beacon_url())
            .with_timeout(Duration::from_millis(500));
        assert!(matches!(client.fetch_latest().await, Err(VrfError::Fetch(_))));
        assert!(matches!(
            client.verify_remote(1, "signature", "abcd").await,
            Err(VrfError::Verify(_))
        ));
    }
}
