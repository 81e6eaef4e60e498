use fairdice_types::EntropyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VrfError {
    #[error("malformed randomness: {0}")]
    MalformedInput(String),

    #[error("unsupported number of sides: {0} (expected 1..=256)")]
    UnsupportedSides(u32),

    #[error("no byte below rejection threshold {threshold} in {len} bytes")]
    EntropyExhausted { threshold: u32, len: usize },

    #[error("failed to fetch round: {0}")]
    Fetch(String),

    #[error("verify request failed: {0}")]
    Verify(String),

    #[error(transparent)]
    EntropyUnavailable(#[from] EntropyError),
}
