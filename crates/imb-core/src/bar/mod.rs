//! Bars and bar patterns
//!
//! A printed Intelligent Mail barcode is a row of 65 bars. Every bar has a
//! tracker section; an ascender and a descender may be added above and
//! below it, which gives the four-symbol alphabet of the textual form:
//!
//! | Symbol | Bar |
//! |--------|-----|
//! | `A` | ascender |
//! | `D` | descender |
//! | `F` | full (ascender and descender) |
//! | `T` | tracker only (`S` is accepted on input) |
//!
//! # See also
//!
//! USPS-B-3200, section 2.1 (bar definitions) and appendix D (bar to
//! character mapping)

mod permutation;

pub use permutation::{
    BAR_MAP, BarMapping, Characters, NUM_CHARACTERS, bars_to_characters, characters_to_bars,
};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Number of bars in a symbol
pub const NUM_BARS: usize = 65;

/// One bar of the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bar {
    /// Tracker plus ascender (`A`)
    Ascender,
    /// Tracker plus descender (`D`)
    Descender,
    /// Tracker, ascender and descender (`F`)
    Full,
    /// Tracker only (`T`, or `S` on input)
    #[default]
    Tracker,
}

impl Bar {
    /// Parse a single symbol.
    ///
    /// Returns `None` for anything outside `{A, D, F, T, S}`. Lowercase
    /// symbols are not accepted here; see [`clean`].
    pub fn from_symbol(symbol: char) -> Option<Bar> {
        match symbol {
            'A' => Some(Bar::Ascender),
            'D' => Some(Bar::Descender),
            'F' => Some(Bar::Full),
            'T' | 'S' => Some(Bar::Tracker),
            _ => None,
        }
    }

    /// Build a bar from its ascender and descender parts.
    pub fn from_parts(ascender: bool, descender: bool) -> Bar {
        match (ascender, descender) {
            (true, true) => Bar::Full,
            (true, false) => Bar::Ascender,
            (false, true) => Bar::Descender,
            (false, false) => Bar::Tracker,
        }
    }

    /// Canonical output symbol (never `S`).
    pub fn symbol(self) -> char {
        match self {
            Bar::Ascender => 'A',
            Bar::Descender => 'D',
            Bar::Full => 'F',
            Bar::Tracker => 'T',
        }
    }

    #[inline]
    pub fn has_ascender(self) -> bool {
        matches!(self, Bar::Ascender | Bar::Full)
    }

    #[inline]
    pub fn has_descender(self) -> bool {
        matches!(self, Bar::Descender | Bar::Full)
    }

    /// The bar as read from a symbol turned upside down.
    ///
    /// Ascenders and descenders swap; full and tracker bars are unchanged.
    pub fn flipped(self) -> Bar {
        match self {
            Bar::Ascender => Bar::Descender,
            Bar::Descender => Bar::Ascender,
            other => other,
        }
    }
}

impl fmt::Display for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Normalize user text: uppercase it and drop all whitespace.
///
/// Applied to bar-pattern text before parsing and to every record field
/// before validation.
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A complete 65-bar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarPattern {
    bars: [Bar; NUM_BARS],
}

impl BarPattern {
    /// Create a pattern from its bars.
    pub fn new(bars: [Bar; NUM_BARS]) -> Self {
        Self { bars }
    }

    /// Parse bar text strictly.
    ///
    /// The text is [`clean`]ed first; afterwards it must hold exactly
    /// [`NUM_BARS`] symbols from the bar alphabet.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] for a wrong symbol count,
    /// [`Error::InvalidSymbol`] for the first symbol outside the alphabet.
    pub fn parse(text: &str) -> Result<Self> {
        let text = clean(text);
        let count = text.chars().count();
        if count != NUM_BARS {
            return Err(Error::InvalidLength {
                expected: NUM_BARS,
                actual: count,
            });
        }

        let mut bars = [Bar::Tracker; NUM_BARS];
        for (position, symbol) in text.chars().enumerate() {
            bars[position] =
                Bar::from_symbol(symbol).ok_or(Error::InvalidSymbol { symbol, position })?;
        }
        Ok(Self { bars })
    }

    /// Parse bar text, reading unknown symbols as tracker bars.
    ///
    /// Used on damaged input, where an unreadable bar should contribute no
    /// ascender or descender bit. The symbol count must still be exact.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] for a wrong symbol count.
    pub fn parse_lenient(text: &str) -> Result<Self> {
        let text = clean(text);
        let count = text.chars().count();
        if count != NUM_BARS {
            return Err(Error::InvalidLength {
                expected: NUM_BARS,
                actual: count,
            });
        }

        let mut bars = [Bar::Tracker; NUM_BARS];
        for (bar, symbol) in bars.iter_mut().zip(text.chars()) {
            *bar = Bar::from_symbol(symbol).unwrap_or(Bar::Tracker);
        }
        Ok(Self { bars })
    }

    /// Render a pattern from the ten character values.
    pub fn from_characters(chars: &Characters) -> Self {
        Self {
            bars: characters_to_bars(chars),
        }
    }

    /// Collect the ten character values carried by this pattern.
    pub fn to_characters(&self) -> Characters {
        bars_to_characters(&self.bars)
    }

    /// All bars, left to right.
    #[inline]
    pub fn bars(&self) -> &[Bar; NUM_BARS] {
        &self.bars
    }

    /// Get a bar by position.
    #[inline]
    pub fn get(&self, position: usize) -> Option<Bar> {
        self.bars.get(position).copied()
    }

    /// The pattern as read from a symbol turned upside down.
    pub fn flipped(&self) -> Self {
        Self {
            bars: self.bars.map(Bar::flipped),
        }
    }
}

impl fmt::Display for BarPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bar in &self.bars {
            write!(f, "{}", bar.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for BarPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
