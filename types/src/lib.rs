//! Fundamental types for FairDice.
//!
//! This crate defines the data exchanged between every other crate in the workspace:
//! beacon rounds, roll records, verification verdicts, timestamps, and the
//! `Clock` / `EntropySource` seams that let tests substitute deterministic doubles.

pub mod clock;
pub mod entropy;
pub mod record;
pub mod round;
pub mod time;
pub mod verdict;

pub use clock::{Clock, SystemClock};
pub use entropy::{EntropyError, EntropySource};
pub use record::RollRecord;
pub use round::{RandomnessRound, DEMO_SIGNATURE_PREFIX, DEMO_THRESHOLD_PROOF_PREFIX};
pub use time::Timestamp;
pub use verdict::{VerificationOutcome, VerificationVerdict};
