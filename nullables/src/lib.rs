//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, entropy, the beacon) are abstracted
//! behind traits or URLs. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never leave the loopback interface
//!
//! Usage: swap real implementations for nullables in tests.

pub mod beacon;
pub mod clock;
pub mod entropy;

pub use beacon::{unreachable_beacon_url, LatestReply, NullBeacon, VerifyReply};
pub use clock::NullClock;
pub use entropy::NullEntropy;
