//! Bit-Vector Values.
//!
//! Every port carries an unsigned value of at most [`MAX_WIDTH`] bits. Values
//! are stored in a `u64` and masked to the port width whenever they are
//! resolved, so the upper bits of a narrow port are always zero.

/// Widest port supported by the kernel.
pub const MAX_WIDTH: u32 = 64;

/// Returns the mask selecting the low `width` bits.
///
/// A width of 64 (or more) yields an all-ones mask; a width of 0 yields 0.
#[inline]
pub fn mask(width: u32) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Number of bits needed to select one of `n` alternatives.
///
/// Used to size multiplexer select lines and register-file address ports.
/// Selecting among zero or one alternatives still takes one bit.
pub fn width_for(n: usize) -> u32 {
    if n <= 2 {
        1
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}
