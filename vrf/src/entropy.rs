//! Operating-system entropy for locally generated fallback rounds.

use fairdice_types::{EntropyError, EntropySource};

/// Reads from the operating system's CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::getrandom(buf).map_err(|e| EntropyError(e.to_string()))
    }

    fn name(&self) -> &str {
        "os"
    }
}
