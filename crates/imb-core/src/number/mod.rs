//! Fixed-width multi-precision number
//!
//! The tracking and routing digits of a symbol are packed into one
//! unsigned integer of a little over 100 bits. It is held as ten 11-bit
//! words, most significant first, so that the frame check sequence can be
//! computed over the same words the packing produces.
//!
//! Every operation keeps each word in `0..=2047`. The width never grows:
//! a carry out of the most significant word is dropped, and callers keep
//! their values within range.
//!
//! # See also
//!
//! USPS-B-3200, section 3.2.1 (conversion of data fields to binary data)

mod fcs;

pub use fcs::{FCS_GENERATOR, FCS_PRESET, frame_check};

use crate::error::{Error, Result};

/// Number of words
pub const NUM_WORDS: usize = 10;

/// Bits per word
pub const WORD_BITS: u32 = 11;

/// Mask of one word
pub const WORD_MASK: u32 = 0x7ff;

/// Bound on multipliers and divisors (2^20)
pub const MAX_FACTOR: u32 = 1 << 20;

/// Ten 11-bit words, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MpNumber {
    words: [u16; NUM_WORDS],
}

impl MpNumber {
    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a number from its words.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if any word exceeds 11 bits.
    pub fn from_words(words: [u16; NUM_WORDS]) -> Result<Self> {
        if let Some(w) = words.iter().find(|&&w| u32::from(w) > WORD_MASK) {
            return Err(Error::OutOfRange(format!("word {} exceeds 11 bits", w)));
        }
        Ok(Self { words })
    }

    /// The words, most significant first.
    #[inline]
    pub fn words(&self) -> &[u16; NUM_WORDS] {
        &self.words
    }

    /// True iff every word is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Add `value`, carrying into more significant words.
    pub fn add(&mut self, value: u32) {
        let mut carry = value;
        for word in self.words.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let x = u32::from(*word) + carry;
            *word = (x & WORD_MASK) as u16;
            carry = x >> WORD_BITS;
        }
    }

    /// Subtract `value`, borrowing from more significant words.
    ///
    /// The caller guarantees the result is non-negative.
    pub fn sub(&mut self, value: u32) {
        let mut borrow = i64::from(value);
        for word in self.words.iter_mut().rev() {
            if borrow == 0 {
                break;
            }
            let x = i64::from(*word) - borrow;
            *word = x.rem_euclid(1 << WORD_BITS) as u16;
            borrow = -x.div_euclid(1 << WORD_BITS);
        }
    }

    /// Replace the number with `self * multiplier + addend`.
    ///
    /// `multiplier` must stay below [`MAX_FACTOR`].
    pub fn multiply_add(&mut self, multiplier: u32, addend: u32) {
        debug_assert!(multiplier < MAX_FACTOR);
        let mut carry = u64::from(addend);
        for word in self.words.iter_mut().rev() {
            let x = u64::from(*word) * u64::from(multiplier) + carry;
            *word = (x & u64::from(WORD_MASK)) as u16;
            carry = x >> WORD_BITS;
        }
    }

    /// Divide in place by `divisor` and return the remainder.
    ///
    /// `divisor` must be non-zero and below [`MAX_FACTOR`].
    pub fn divide_mod(&mut self, divisor: u32) -> u32 {
        debug_assert!(divisor != 0 && divisor < MAX_FACTOR);
        let mut rem = 0u64;
        for word in self.words.iter_mut() {
            let x = u64::from(*word) + (rem << WORD_BITS);
            *word = (x / u64::from(divisor)) as u16;
            rem = x % u64::from(divisor);
        }
        rem as u32
    }

    /// Frame check sequence over the words.
    pub fn frame_check(&self) -> u16 {
        frame_check(&self.words)
    }

    /// Value as `u128` (the number is well under 128 bits).
    pub fn to_u128(&self) -> u128 {
        self.words
            .iter()
            .fold(0u128, |acc, &w| (acc << WORD_BITS) | u128::from(w))
    }
}
