//! Local entropy abstraction.
//!
//! When the beacon is unreachable, the randomness source fills a substitute
//! round from a cryptographically strong local generator through this trait.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("local entropy unavailable: {0}")]
pub struct EntropyError(pub String);

/// A cryptographically strong byte generator.
pub trait EntropySource: Send + Sync {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError>;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}
