//! Roll orchestration.
//!
//! [`RollEngine`] owns the "current roll" slot and the bounded history. A roll
//! fetches a round from the beacon (or its local fallback), converts the
//! randomness into a die face, and records the result; verification hands the
//! current roll's round to the proof verifier.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod stats;

pub use config::{DiceConfig, ExhaustionPolicy};
pub use engine::RollEngine;
pub use error::EngineError;
pub use history::RollHistory;
pub use stats::{RollStats, StatsSnapshot};
