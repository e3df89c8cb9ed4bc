//! Codeword tables
//!
//! Each character of a symbol is a 13-bit pattern with either five or two
//! bits set (or, when complemented, eight or eleven). The 1365 codewords
//! are assigned to those patterns:
//!
//! - indices `0..=1286`: the 1287 patterns with five bits set
//! - indices `1287..=1364`: the 78 patterns with two bits set
//!
//! Within a weight class, a pattern and its bit reversal occupy adjacent
//! slots from the low end of the range; patterns equal to their own
//! reversal fill the range from the high end. A pattern and its 13-bit
//! complement decode to the same codeword; which of the two was printed
//! carries one bit of the frame check sequence.
//!
//! The tables are built once on first use and shared read-only afterwards.
//!
//! # See also
//!
//! USPS-B-3200, section 3.2.4 (codewords to characters) and appendix C
//! (table generation)

use crate::error::{Error, Result};
use std::sync::LazyLock;

/// Number of codewords
pub const NUM_CODEWORDS: usize = 1365;

/// Number of distinct 13-bit patterns
pub const NUM_PATTERNS: usize = 8192;

/// Mask of the 13 character bits
pub const CHAR_MASK: u16 = 0x1fff;

/// Bit population and index range of one codeword class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightClass {
    /// Number of set bits in the uncomplemented pattern
    pub bits: u32,
    /// First codeword index of the class
    pub low: u16,
    /// Last codeword index of the class
    pub high: u16,
}

/// Five-bit patterns: codewords 0..=1286
pub const WEIGHT_FIVE: WeightClass = WeightClass {
    bits: 5,
    low: 0,
    high: 1286,
};

/// Two-bit patterns: codewords 1287..=1364
pub const WEIGHT_TWO: WeightClass = WeightClass {
    bits: 2,
    low: 1287,
    high: 1364,
};

/// Forward and reverse lookup tables between codewords and patterns.
#[derive(Debug, Clone)]
pub struct CodewordTables {
    encode: Vec<u16>,
    decode: Vec<Option<u16>>,
    fcs: Vec<u8>,
}

static TABLES: LazyLock<CodewordTables> = LazyLock::new(CodewordTables::build);

/// Shared tables, built on first access.
pub fn tables() -> &'static CodewordTables {
    &TABLES
}

/// Reverse the low 13 bits of a pattern.
#[inline]
pub fn reverse_bits(pattern: u16) -> u16 {
    pattern.reverse_bits() >> 3
}

impl CodewordTables {
    /// Build all three tables from both weight classes.
    ///
    /// Deterministic; [`tables`] caches the result for the process.
    pub fn build() -> Self {
        let mut tables = Self {
            encode: vec![0; NUM_CODEWORDS],
            decode: vec![None; NUM_PATTERNS],
            fcs: vec![0; NUM_PATTERNS],
        };
        tables.fill_class(WEIGHT_FIVE);
        tables.fill_class(WEIGHT_TWO);
        tables
    }

    fn fill_class(&mut self, class: WeightClass) {
        let mut low = class.low;
        let mut high = class.high;

        for fwd in 0..NUM_PATTERNS as u16 {
            if fwd.count_ones() != class.bits {
                continue;
            }
            let rev = reverse_bits(fwd);

            if fwd == rev {
                // palindromes fill the class from the top
                self.assign(high, fwd);
                high -= 1;
            } else if fwd < rev {
                self.assign(low, fwd);
                self.assign(low + 1, rev);
                low += 2;
            }
        }
    }

    fn assign(&mut self, index: u16, pattern: u16) {
        let complement = pattern ^ CHAR_MASK;
        self.encode[index as usize] = pattern;
        self.decode[pattern as usize] = Some(index);
        self.decode[complement as usize] = Some(index);
        self.fcs[pattern as usize] = 0;
        self.fcs[complement as usize] = 1;
    }

    /// Pattern printed for a codeword (before any complement).
    ///
    /// # Errors
    ///
    /// [`Error::CodewordOutOfRange`] when `codeword >= 1365`.
    pub fn pattern(&self, codeword: u16) -> Result<u16> {
        self.encode
            .get(codeword as usize)
            .copied()
            .ok_or(Error::CodewordOutOfRange(codeword))
    }

    /// Codeword carried by a 13-bit pattern, if the pattern is a codeword
    /// or the complement of one.
    #[inline]
    pub fn codeword(&self, pattern: u16) -> Option<u16> {
        self.decode
            .get(pattern as usize)
            .copied()
            .flatten()
    }

    /// Whether a pattern decodes to any codeword.
    #[inline]
    pub fn is_codeword(&self, pattern: u16) -> bool {
        self.codeword(pattern).is_some()
    }

    /// Frame check bit read from a pattern: 1 for the complemented form.
    #[inline]
    pub fn fcs_bit(&self, pattern: u16) -> u8 {
        self.fcs.get(pattern as usize).copied().unwrap_or(0)
    }

    /// Number of patterns with a decode entry.
    pub fn decodable_count(&self) -> usize {
        self.decode.iter().filter(|d| d.is_some()).count()
    }
}
