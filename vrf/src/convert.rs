//! Bias-free conversion of beacon randomness into a bounded integer.
//!
//! A naive `byte % 6` favours faces 1–4 because 256 is not a multiple of 6.
//! Bytes at or above the largest multiple of `sides` that fits in a byte are
//! rejected; the first byte below that threshold decides the result.
//!
//! If every byte is rejected, [`draw`] falls back to `bytes[0] % sides`. This
//! residual bias is kept for compatibility with rolls recorded by earlier
//! clients. Callers that prefer to fetch more entropy use [`draw_strict`].

use crate::VrfError;

/// Largest supported die; anything bigger cannot be drawn from single bytes.
pub const MAX_SIDES: u32 = 256;

/// Standard six-sided die.
pub const DIE_SIDES: u32 = 6;

/// Decode a hex randomness string into bytes.
pub fn decode_randomness(random_hex: &str) -> Result<Vec<u8>, VrfError> {
    if random_hex.is_empty() {
        return Err(VrfError::MalformedInput("empty randomness".into()));
    }
    hex::decode(random_hex).map_err(|e| VrfError::MalformedInput(e.to_string()))
}

/// `floor(256 / sides) * sides`; bytes at or above this are rejected.
pub fn rejection_threshold(sides: u32) -> u32 {
    (256 / sides) * sides
}

fn check_sides(sides: u32) -> Result<(), VrfError> {
    if sides == 0 || sides > MAX_SIDES {
        return Err(VrfError::UnsupportedSides(sides));
    }
    Ok(())
}

/// First byte below the rejection threshold, reduced modulo `sides`.
pub fn draw_from_bytes(bytes: &[u8], sides: u32) -> Option<u32> {
    let threshold = rejection_threshold(sides);
    bytes
        .iter()
        .map(|&b| u32::from(b))
        .find(|&b| b < threshold)
        .map(|b| b % sides)
}

/// Draw an integer in `[0, sides)` from hex randomness.
///
/// Falls back to `bytes[0] % sides` when no byte qualifies.
pub fn draw(random_hex: &str, sides: u32) -> Result<u32, VrfError> {
    check_sides(sides)?;
    let bytes = decode_randomness(random_hex)?;
    Ok(draw_from_bytes(&bytes, sides).unwrap_or_else(|| u32::from(bytes[0]) % sides))
}

/// Like [`draw`], but reports exhaustion instead of accepting a biased byte.
pub fn draw_strict(random_hex: &str, sides: u32) -> Result<u32, VrfError> {
    check_sides(sides)?;
    let bytes = decode_randomness(random_hex)?;
    draw_from_bytes(&bytes, sides).ok_or(VrfError::EntropyExhausted {
        threshold: rejection_threshold(sides),
        len: bytes.len(),
    })
}

/// Die face in `[1, sides]`.
pub fn face(random_hex: &str, sides: u32) -> Result<u32, VrfError> {
    draw(random_hex, sides).map(|v| v + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_for_six_sides_is_252() {
        assert_eq!(rejection_threshold(6), 252);
        assert_eq!(rejection_threshold(1), 256);
        assert_eq!(rejection_threshold(256), 256);
    }

    #[test]
    fn skips_bytes_at_or_above_threshold() {
        // 0xfc = 252 is rejected, the following 0x00 decides.
        let hex = format!("fc00{}", "11".repeat(30));
        assert_eq!(draw(&hex, 6).unwrap(), 0);

        // 0xfb = 251 qualifies: 251 % 6 = 5.
        assert_eq!(draw("fb00", 6).unwrap(), 5);
    }

    #[test]
    fn exhausted_input_falls_back_to_first_byte() {
        let hex = "ff".repeat(32);
        assert_eq!(draw(&hex, 6).unwrap(), 3);
        assert_eq!(face(&hex, 6).unwrap(), 4);
    }

    #[test]
    fn strict_draw_reports_exhaustion() {
        let hex = "fd".repeat(32);
        match draw_strict(&hex, 6) {
            Err(VrfError::EntropyExhausted { threshold, len }) => {
                assert_eq!(threshold, 252);
                assert_eq!(len, 32);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(draw_strict("fd10", 6).unwrap(), 4);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(draw("abc", 6), Err(VrfError::MalformedInput(_))));
        assert!(matches!(draw("zz11", 6), Err(VrfError::MalformedInput(_))));
        assert!(matches!(draw("", 6), Err(VrfError::MalformedInput(_))));
    }

    #[test]
    fn rejects_unsupported_sides() {
        assert!(matches!(draw("00", 0), Err(VrfError::UnsupportedSides(0))));
        assert!(matches!(draw("00", 257), Err(VrfError::UnsupportedSides(257))));
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        assert_eq!(draw("0A", 6).unwrap(), draw("0a", 6).unwrap());
    }
}
