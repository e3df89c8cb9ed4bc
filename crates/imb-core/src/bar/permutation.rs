//! Bar to character permutation
//!
//! The ten 13-bit characters of a symbol are spread over its bars: every
//! bar carries exactly one bit of one character in its descender and one
//! bit of another character in its ascender. Across all 65 bars each of
//! the 130 character bits appears exactly once.
//!
//! # See also
//!
//! USPS-B-3200, appendix D, table "Bar to Character Mapping"

use super::{Bar, NUM_BARS};

/// Number of characters in a symbol
pub const NUM_CHARACTERS: usize = 10;

/// The ten 13-bit character values of a symbol (A..J).
pub type Characters = [u16; NUM_CHARACTERS];

/// Where the descender and ascender of one bar land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarMapping {
    /// Character (0..10) toggled by the descender
    pub descender_char: u8,
    /// Bit (0..13) toggled by the descender
    pub descender_bit: u8,
    /// Character (0..10) toggled by the ascender
    pub ascender_char: u8,
    /// Bit (0..13) toggled by the ascender
    pub ascender_bit: u8,
}

impl BarMapping {
    #[inline]
    pub fn descender_mask(&self) -> u16 {
        1 << self.descender_bit
    }

    #[inline]
    pub fn ascender_mask(&self) -> u16 {
        1 << self.ascender_bit
    }
}

const fn map(descender_char: u8, descender_bit: u8, ascender_char: u8, ascender_bit: u8) -> BarMapping {
    BarMapping {
        descender_char,
        descender_bit,
        ascender_char,
        ascender_bit,
    }
}

/// Bar to character mapping, indexed by bar position (left to right)
#[rustfmt::skip]
pub const BAR_MAP: [BarMapping; NUM_BARS] = [
    map(7, 2, 4, 3), map(1, 10, 0, 0), map(9, 12, 2, 8), map(5, 5, 6, 11), map(8, 9, 3, 1), // 1-5
    map(0, 1, 5, 12), map(2, 5, 1, 8), map(4, 4, 9, 11), map(6, 3, 8, 10), map(3, 9, 7, 6), // 6-10
    map(5, 11, 1, 4), map(8, 5, 2, 12), map(9, 10, 0, 2), map(7, 1, 6, 7), map(3, 6, 4, 9), // 11-15
    map(0, 3, 8, 6), map(6, 4, 2, 7), map(1, 1, 9, 9), map(7, 10, 5, 2), map(4, 0, 3, 8), // 16-20
    map(6, 2, 0, 4), map(8, 11, 1, 0), map(9, 8, 3, 12), map(2, 6, 7, 7), map(5, 1, 4, 10), // 21-25
    map(1, 12, 6, 9), map(7, 3, 8, 0), map(5, 8, 9, 7), map(4, 6, 2, 10), map(3, 4, 0, 5), // 26-30
    map(8, 4, 5, 7), map(7, 11, 1, 9), map(6, 0, 9, 6), map(0, 6, 4, 8), map(2, 1, 3, 2), // 31-35
    map(5, 9, 8, 12), map(4, 11, 6, 1), map(9, 5, 7, 4), map(3, 3, 1, 2), map(0, 7, 2, 0), // 36-40
    map(1, 3, 4, 1), map(6, 10, 3, 5), map(8, 7, 9, 4), map(2, 11, 5, 6), map(0, 8, 7, 12), // 41-45
    map(4, 2, 8, 1), map(5, 10, 3, 0), map(9, 3, 0, 9), map(6, 5, 2, 4), map(7, 8, 1, 7), // 46-50
    map(5, 0, 4, 5), map(2, 3, 0, 10), map(6, 12, 9, 2), map(3, 11, 1, 6), map(8, 8, 7, 9), // 51-55
    map(5, 4, 0, 11), map(1, 5, 2, 2), map(9, 1, 4, 12), map(8, 3, 6, 6), map(7, 0, 3, 7), // 56-60
    map(4, 7, 7, 5), map(0, 12, 1, 11), map(2, 9, 9, 0), map(6, 8, 5, 3), map(3, 10, 8, 2), // 61-65
];

/// Accumulate the character values carried by a row of bars.
pub fn bars_to_characters(bars: &[Bar; NUM_BARS]) -> Characters {
    let mut chars = [0u16; NUM_CHARACTERS];
    for (bar, mapping) in bars.iter().zip(BAR_MAP.iter()) {
        if bar.has_descender() {
            chars[mapping.descender_char as usize] |= mapping.descender_mask();
        }
        if bar.has_ascender() {
            chars[mapping.ascender_char as usize] |= mapping.ascender_mask();
        }
    }
    chars
}

/// Render character values as a row of bars.
///
/// Only the low 13 bits of each character are used.
pub fn characters_to_bars(chars: &Characters) -> [Bar; NUM_BARS] {
    let mut bars = [Bar::Tracker; NUM_BARS];
    for (bar, mapping) in bars.iter_mut().zip(BAR_MAP.iter()) {
        let descender = chars[mapping.descender_char as usize] & mapping.descender_mask() != 0;
        let ascender = chars[mapping.ascender_char as usize] & mapping.ascender_mask() != 0;
        *bar = Bar::from_parts(ascender, descender);
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::BarPattern;

    const SAMPLE: &str = "ATTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT";
    const SAMPLE_CHARS: Characters = [4436, 31, 31, 47, 7051, 4797, 6491, 2595, 5162, 1130];

    #[test]
    fn test_every_character_bit_used_once() {
        let mut seen = [0u16; NUM_CHARACTERS];
        for mapping in &BAR_MAP {
            for (ch, mask) in [
                (mapping.descender_char, mapping.descender_mask()),
                (mapping.ascender_char, mapping.ascender_mask()),
            ] {
                assert!(ch < 10);
                assert_eq!(seen[ch as usize] & mask, 0, "bit used twice");
                seen[ch as usize] |= mask;
            }
        }
        assert!(seen.iter().all(|&c| c == 0x1fff));
    }

    #[test]
    fn test_sample_characters() {
        let pattern = BarPattern::parse(SAMPLE).unwrap();
        assert_eq!(bars_to_characters(pattern.bars()), SAMPLE_CHARS);
        assert_eq!(BarPattern::from_characters(&SAMPLE_CHARS).to_string(), SAMPLE);
    }

    #[test]
    fn test_single_bar_touches_one_bit() {
        let chars = bars_to_characters(&{
            let mut bars = [Bar::Tracker; NUM_BARS];
            bars[0] = Bar::Descender;
            bars
        });
        assert_eq!(chars[7], 1 << 2);
        assert_eq!(chars.iter().map(|c| c.count_ones()).sum::<u32>(), 1);
    }
}
