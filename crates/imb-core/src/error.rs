//! Error types for imb-core
//!
//! Provides a unified error type for the bar-pattern and numeric
//! primitives in the core crate.

use thiserror::Error;

/// imb-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bar pattern does not have the required number of bars
    #[error("invalid bar pattern length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Symbol outside the bar alphabet
    #[error("invalid bar symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Codeword index outside the codeword table
    #[error("codeword index out of range: {0}")]
    CodewordOutOfRange(u16),

    /// Value does not fit the fixed-width number
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// Result type alias for imb-core operations
pub type Result<T> = std::result::Result<T, Error>;
