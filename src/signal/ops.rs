//! Bitwise gate operations on 16-bit signals.

use super::{mask, Signal};

/// Bitwise complement.
#[inline]
pub fn not(a: Signal) -> Signal {
    mask(!(a as u32))
}

/// Bitwise AND.
#[inline]
pub fn and(a: Signal, b: Signal) -> Signal {
    mask(a as u32 & b as u32)
}

/// Bitwise OR.
#[inline]
pub fn or(a: Signal, b: Signal) -> Signal {
    mask(a as u32 | b as u32)
}

/// Left shift; bits pushed past bit 15 are lost.
///
/// Amounts of 16 or more clear the signal.
#[inline]
pub fn lshift(a: Signal, amount: u8) -> Signal {
    if amount > 31 {
        return 0;
    }
    mask((a as u32) << amount)
}

/// Logical (zero-filling) right shift.
#[inline]
pub fn rshift(a: Signal, amount: u8) -> Signal {
    if amount > 31 {
        return 0;
    }
    mask((a as u32) >> amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_not_masks_to_16_bits() {
        assert_eq!(not(0), 65535);
        assert_eq!(not(123), 65412);
        assert_eq!(not(456), 65079);
    }

    #[test]
    fn test_binary_gates() {
        assert_eq!(and(123, 456), 72);
        assert_eq!(or(123, 456), 507);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(lshift(123, 2), 492);
        assert_eq!(rshift(456, 2), 114);
        assert_eq!(lshift(0xFFFF, 1), 0xFFFE);
        assert_eq!(rshift(0x8000, 15), 1);
        assert_eq!(lshift(1, 16), 0);
        assert_eq!(lshift(1, 200), 0);
    }

    proptest! {
        #[test]
        fn not_is_an_involution(a in any::<u16>()) {
            prop_assert_eq!(not(not(a)), a);
        }

        #[test]
        fn lshift_matches_wrapping_shl(a in any::<u16>(), n in 0u8..=15) {
            prop_assert_eq!(lshift(a, n), a.wrapping_shl(n as u32));
        }

        #[test]
        fn rshift_never_sign_extends(a in any::<u16>(), n in 1u8..=15) {
            prop_assert!(rshift(a, n) <= (u16::MAX >> n));
        }
    }
}
