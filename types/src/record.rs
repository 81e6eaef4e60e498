//! Roll records: a beacon round plus the die face derived from it.

use serde::{Deserialize, Serialize};

use crate::{RandomnessRound, Timestamp};

/// The outcome of one roll.
///
/// `dice` is a pure function of `round.randomness`; recomputing it from the
/// same randomness always yields the same face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    #[serde(flatten)]
    pub round: RandomnessRound,
    /// Die face in `[1, sides]`.
    pub dice: u32,
    /// When the underlying round was produced.
    pub timestamp: Timestamp,
}

impl RollRecord {
    pub fn from_round(round: RandomnessRound, dice: u32) -> Self {
        let timestamp = round.timestamp();
        Self {
            round,
            dice,
            timestamp,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.round.is_demo()
    }
}
