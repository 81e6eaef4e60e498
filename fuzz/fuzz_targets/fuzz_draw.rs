#![no_main]

use arbitrary::Arbitrary;
use fairdice_vrf::convert;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    randomness: String,
    sides: u16,
}

// Drawing from arbitrary text never panics, and any accepted value is in range.
fuzz_target!(|input: Input| {
    let sides = u32::from(input.sides);

    if let Ok(v) = convert::draw(&input.randomness, sides) {
        assert!(v < sides);
        let face = convert::face(&input.randomness, sides).unwrap();
        assert_eq!(face, v + 1);
    }

    if let Ok(strict) = convert::draw_strict(&input.randomness, sides) {
        // a strict draw always agrees with the lenient one
        assert_eq!(Ok(strict), convert::draw(&input.randomness, sides).map_err(|_| ()));
    }

    if let Ok(bytes) = convert::decode_randomness(&input.randomness) {
        if (1..=convert::MAX_SIDES).contains(&sides) {
            let threshold = convert::rejection_threshold(sides);
            if let Some(v) = convert::draw_from_bytes(&bytes, sides) {
                assert!(bytes.iter().any(|&b| u32::from(b) < threshold && u32::from(b) % sides == v));
            }
        }
    }
});
