//! Sign-magnitude numbers.
//!
//! Bit 15 of a word is the sign, bits 14..0 the magnitude. This is not two's
//! complement: negation flips the sign bit only.

use crate::constants::{MAGNITUDE_MASK, SIGN_MASK};

/// Converts a machine word to a host integer.
pub fn decode(word:u16) -> i32 {
    let magnitude = (word & MAGNITUDE_MASK) as i32;
    if word & SIGN_MASK != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Converts a host integer to a machine word.
///
/// Magnitudes above 0x7FFF wrap silently and zero never carries a sign, so
/// `encode(-0)` and `encode(0)` are both `0x0000`.
pub fn encode(value:i32) -> u16 {
    let sign = if value < 0 { SIGN_MASK } else { 0 };
    let magnitude = (value.unsigned_abs() & MAGNITUDE_MASK as u32) as u16;
    sign | magnitude
}

pub fn is_zero(word:u16) -> bool {
    decode(word) == 0
}

pub fn is_negative(word:u16) -> bool {
    decode(word) < 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode(0x0007), 7);
        assert_eq!(decode(0x8005), -5);
        assert_eq!(decode(0x7FFF), 32767);
        assert_eq!(decode(0xFFFF), -32767);
        assert_eq!(decode(0x8000), 0);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(7), 0x0007);
        assert_eq!(encode(-5), 0x8005);
        assert_eq!(encode(-25), 0x8019);
        assert_eq!(encode(0), 0x0000);
        assert_eq!(encode(-0), 0x0000);
    }

    #[test]
    fn test_encode_wraps_large_magnitudes() {
        // inherited behaviour: only the low 15 bits of |x| survive
        assert_eq!(encode(0x8000), 0x0000);
        assert_eq!(encode(0x8001), 0x0001);
        assert_eq!(encode(-0x8003), 0x8003);
        assert_eq!(encode(40000), (40000 & 0x7FFF) as u16);
    }

    #[test]
    fn test_round_trip_full_range() {
        for x in -32767..=32767 {
            assert_eq!(decode(encode(x)), x);
        }
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert!(is_zero(0x8000));
        assert!(!is_negative(0x8000));
    }

    proptest! {
        #[test]
        fn round_trip(x in -32767i32..=32767) {
            prop_assert_eq!(decode(encode(x)), x);
        }

        #[test]
        fn flags_follow_decoded_value(w in any::<u16>()) {
            prop_assert_eq!(is_zero(w), decode(w) == 0);
            prop_assert_eq!(is_negative(w), decode(w) < 0);
            prop_assert!(!(is_zero(w) && is_negative(w)));
        }
    }
}
