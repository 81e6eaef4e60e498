//! Verification verdicts.

use serde::{Deserialize, Serialize};

/// Which authenticity path answered a verification request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", content = "valid", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The beacon's verify endpoint answered.
    Remote(bool),
    /// The beacon was unreachable; local heuristics answered.
    LocalFallback(bool),
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Remote(valid) | Self::LocalFallback(valid) => *valid,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::LocalFallback(_))
    }
}

/// Result of verifying one round. Reported to the caller, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationVerdict {
    pub valid: bool,
    /// Authenticity answer, absent when an earlier check short-circuited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<VerificationOutcome>,
    /// Whether the randomness passed the entropy sanity check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub randomness_ok: Option<bool>,
    /// Diagnostic reason for a negative verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerificationVerdict {
    /// A negative verdict produced before any authenticity path ran.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            outcome: None,
            randomness_ok: None,
            reason: Some(reason.into()),
        }
    }

    /// Combine the authenticity answer with the randomness-property check.
    pub fn from_checks(outcome: VerificationOutcome, randomness_ok: bool) -> Self {
        let reason = match (outcome.is_valid(), randomness_ok) {
            (true, true) => None,
            (false, _) => Some("authenticity check failed".to_string()),
            (true, false) => Some("randomness failed entropy check".to_string()),
        };
        Self {
            valid: outcome.is_valid() && randomness_ok,
            outcome: Some(outcome),
            randomness_ok: Some(randomness_ok),
            reason,
        }
    }
}
