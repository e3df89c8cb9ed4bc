//! Frame check sequence
//!
//! An 11-bit CRC over the ten 11-bit words of the packed number, with
//! generator polynomial 0xF35 and preset 0x1F0 (equivalently, a 0x7FF
//! preset over 102 bits with the two leading zero bits skipped).
//!
//! # See also
//!
//! USPS-B-3200, section 3.2.2 (generation of 11-bit CRC frame check
//! sequence)

/// Generator polynomial (bit 11 implied)
pub const FCS_GENERATOR: u16 = 0xf35;

/// Register value before the first word
pub const FCS_PRESET: u16 = 0x1f0;

/// Compute the frame check sequence of a word sequence.
pub fn frame_check(words: &[u16]) -> u16 {
    let mut fcs = FCS_PRESET;
    for &word in words {
        fcs ^= word;
        for _ in 0..11 {
            fcs <<= 1;
            if fcs & 0x800 != 0 {
                fcs ^= FCS_GENERATOR;
            }
        }
    }
    fcs & 0x7ff
}
