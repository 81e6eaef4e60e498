//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use fairdice_utils::LogFormat;
use fairdice_vrf::{DEFAULT_BEACON_URL, DIE_SIDES, MAX_SIDES};

use crate::EngineError;

/// What a roll does when no randomness byte falls below the rejection threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Accept `bytes[0] % sides`, matching previously recorded rolls.
    #[default]
    FirstByte,
    /// Fetch further rounds, up to `max_refetch_attempts`, before accepting the fallback.
    Refetch,
}

/// Configuration for a FairDice engine and its surfaces.
///
/// Can be loaded from a TOML file via [`DiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiceConfig {
    /// Base URL of the randomness beacon.
    #[serde(default = "default_beacon_url")]
    pub beacon_url: String,

    /// Bound on each beacon request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of die faces.
    #[serde(default = "default_sides")]
    pub sides: u32,

    /// Number of rolls kept in history.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Behaviour when rejection sampling runs out of bytes.
    #[serde(default)]
    pub on_exhausted: ExhaustionPolicy,

    /// Extra rounds fetched under [`ExhaustionPolicy::Refetch`].
    #[serde(default = "default_max_refetch_attempts")]
    pub max_refetch_attempts: u32,

    /// Address the RPC server binds to.
    #[serde(default = "default_rpc_bind")]
    pub rpc_bind: String,

    /// RPC port.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_beacon_url() -> String {
    DEFAULT_BEACON_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_sides() -> u32 {
    DIE_SIDES
}

fn default_history_capacity() -> usize {
    8
}

fn default_max_refetch_attempts() -> u32 {
    3
}

fn default_rpc_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    7080
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sides == 0 || self.sides > MAX_SIDES {
            return Err(EngineError::Config(format!(
                "sides must be in 1..={MAX_SIDES}, got {}",
                self.sides
            )));
        }
        if self.history_capacity == 0 {
            return Err(EngineError::Config("history_capacity must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(EngineError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.beacon_url.trim().is_empty() {
            return Err(EngineError::Config("beacon_url must not be empty".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            beacon_url: default_beacon_url(),
            request_timeout_secs: default_request_timeout_secs(),
            sides: default_sides(),
            history_capacity: default_history_capacity(),
            on_exhausted: ExhaustionPolicy::default(),
            max_refetch_attempts: default_max_refetch_attempts(),
            rpc_bind: default_rpc_bind(),
            rpc_port: default_rpc_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DiceConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = DiceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.beacon_url, config.beacon_url);
        assert_eq!(parsed.history_capacity, config.history_capacity);
        assert_eq!(parsed.on_exhausted, config.on_exhausted);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DiceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.sides, 6);
        assert_eq!(config.history_capacity, 8);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.on_exhausted, ExhaustionPolicy::FirstByte);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            beacon_url = "http://localhost:8545"
            on_exhausted = "refetch"
            log_format = "json"
        "#;
        let config = DiceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.beacon_url, "http://localhost:8545");
        assert_eq!(config.on_exhausted, ExhaustionPolicy::Refetch);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.rpc_port, 7080);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(DiceConfig::from_toml_str("sides = 0").is_err());
        assert!(DiceConfig::from_toml_str("sides = 300").is_err());
        assert!(DiceConfig::from_toml_str("history_capacity = 0").is_err());
        assert!(DiceConfig::from_toml_str("request_timeout_secs = 0").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sides = 20\nhistory_capacity = 3").unwrap();
        let config = DiceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.sides, 20);
        assert_eq!(config.history_capacity, 3);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = DiceConfig::from_toml_file("/nonexistent/fairdice.toml");
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
