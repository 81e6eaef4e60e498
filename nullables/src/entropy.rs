//! Nullable entropy: deterministic "random" bytes.

use fairdice_types::{EntropyError, EntropySource};
use std::sync::Mutex;

enum Mode {
    /// Every byte is the same value.
    Constant(u8),
    /// Bytes count upward across calls, wrapping at 255.
    Counting(u8),
    /// Bytes cycle through a fixed pattern across calls.
    Pattern { bytes: Vec<u8>, pos: usize },
    /// Every call fails.
    Failing,
}

/// A deterministic entropy source for testing.
pub struct NullEntropy {
    mode: Mutex<Mode>,
    calls: Mutex<usize>,
}

impl NullEntropy {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode: Mutex::new(mode),
            calls: Mutex::new(0),
        }
    }

    /// Fill every buffer with `byte`.
    pub fn constant(byte: u8) -> Self {
        Self::with_mode(Mode::Constant(byte))
    }

    /// Emit 0, 1, 2, ... continuing across calls.
    pub fn counting() -> Self {
        Self::with_mode(Mode::Counting(0))
    }

    /// Cycle through `bytes` continuing across calls.
    ///
    /// An empty pattern behaves like `constant(0)`.
    pub fn pattern(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::constant(0);
        }
        Self::with_mode(Mode::Pattern { bytes, pos: 0 })
    }

    /// Simulate an unavailable CSPRNG.
    pub fn failing() -> Self {
        Self::with_mode(Mode::Failing)
    }

    /// Number of `fill` calls so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl EntropySource for NullEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        *self.calls.lock().unwrap() += 1;
        let mut mode = self.mode.lock().unwrap();
        match &mut *mode {
            Mode::Constant(byte) => buf.fill(*byte),
            Mode::Counting(next) => {
                for b in buf.iter_mut() {
                    *b = *next;
                    *next = next.wrapping_add(1);
                }
            }
            Mode::Pattern { bytes, pos } => {
                for b in buf.iter_mut() {
                    *b = bytes[*pos];
                    *pos = (*pos + 1) % bytes.len();
                }
            }
            Mode::Failing => return Err(EntropyError("null entropy configured to fail".into())),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "null-entropy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_continues_across_calls() {
        let entropy = NullEntropy::counting();
        let mut a = [0u8; 3];
        let mut b = [0u8; 2];
        entropy.fill(&mut a).unwrap();
        entropy.fill(&mut b).unwrap();
        assert_eq!(a, [0, 1, 2]);
        assert_eq!(b, [3, 4]);
        assert_eq!(entropy.calls(), 2);
    }

    #[test]
    fn pattern_cycles() {
        let entropy = NullEntropy::pattern(vec![9, 8]);
        let mut buf = [0u8; 5];
        entropy.fill(&mut buf).unwrap();
        assert_eq!(buf, [9, 8, 9, 8, 9]);
    }

    #[test]
    fn failing_reports_error() {
        let mut buf = [0u8; 1];
        assert!(NullEntropy::failing().fill(&mut buf).is_err());
    }
}
