//! 16-bit signal primitives.
//!
//! Every wire carries an unsigned 16-bit signal. Gate arithmetic is done
//! in a wider integer and masked back down so that bits shifted past the
//! top of the word are discarded instead of widening the result.

pub mod ops;

pub use ops::{and, lshift, not, or, rshift};

/// A signal carried by a wire (0 to 65535).
pub type Signal = u16;

/// Mask applied to every gate result.
pub const SIGNAL_MASK: u32 = 0xFFFF;

/// Largest shift amount that still leaves a bit in the word.
pub const MAX_SHIFT: u8 = 15;

/// Truncate a widened intermediate value to a signal.
#[inline]
pub fn mask(value: u32) -> Signal {
    (value & SIGNAL_MASK) as Signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_discards_high_bits() {
        assert_eq!(mask(0x1_FFFE), 0xFFFE);
        assert_eq!(mask(0x10000), 0);
        assert_eq!(mask(42), 42);
    }
}
