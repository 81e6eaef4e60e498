use proptest::prelude::*;

use fairdice_vrf::convert::{draw, draw_from_bytes, draw_strict, rejection_threshold};

proptest! {
    /// Any valid hex of at least two bytes draws into [0, 6).
    #[test]
    fn draw_stays_in_range(bytes in prop::collection::vec(any::<u8>(), 2..64)) {
        let hex = hex::encode(&bytes);
        let v = draw(&hex, 6).unwrap();
        prop_assert!(v < 6);
    }

    /// The same randomness always draws the same value.
    #[test]
    fn draw_is_deterministic(bytes in prop::collection::vec(any::<u8>(), 1..64), sides in 1u32..=256) {
        let hex = hex::encode(&bytes);
        prop_assert_eq!(draw(&hex, sides).unwrap(), draw(&hex, sides).unwrap());
    }

    /// The result comes from the first byte under the threshold.
    #[test]
    fn draw_uses_first_qualifying_byte(bytes in prop::collection::vec(any::<u8>(), 1..64), sides in 1u32..=256) {
        let threshold = rejection_threshold(sides);
        let hex = hex::encode(&bytes);
        let expected = bytes
            .iter()
            .map(|&b| u32::from(b))
            .find(|&b| b < threshold)
            .map(|b| b % sides)
            .unwrap_or(u32::from(bytes[0]) % sides);
        prop_assert_eq!(draw(&hex, sides).unwrap(), expected);
    }

    /// Strict and lenient draws agree whenever a byte qualifies.
    #[test]
    fn strict_agrees_when_not_exhausted(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let hex = hex::encode(&bytes);
        match draw_from_bytes(&bytes, 6) {
            Some(v) => prop_assert_eq!(draw_strict(&hex, 6).unwrap(), v),
            None => prop_assert!(draw_strict(&hex, 6).is_err()),
        }
    }

    /// Odd-length input is always malformed.
    #[test]
    fn odd_length_is_rejected(bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        let mut hex = hex::encode(&bytes);
        hex.pop();
        prop_assert!(draw(&hex, 6).is_err());
    }
}
