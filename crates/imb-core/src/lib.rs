//! imb-core - Core data structures for the Intelligent Mail barcode
//!
//! This crate provides the building blocks the codec is assembled from:
//!
//! - [`Bar`] / [`BarPattern`] - The 65-bar symbol and its text alphabet
//! - [`Characters`] - The ten 13-bit characters carried by the bars
//! - [`CodewordTables`] - Codeword to character pattern tables
//! - [`MpNumber`] - Ten 11-bit words holding the packed data fields
//! - [`frame_check`] - The 11-bit frame check sequence
//!
//! # See also
//!
//! USPS-B-3200, Intelligent Mail Barcode 4-State

pub mod bar;
pub mod codeword;
pub mod error;
pub mod number;

pub use bar::{
    BAR_MAP, Bar, BarMapping, BarPattern, Characters, NUM_BARS, NUM_CHARACTERS, clean,
};
pub use codeword::{CHAR_MASK, CodewordTables, NUM_CODEWORDS, reverse_bits, tables};
pub use error::{Error, Result};
pub use number::{MpNumber, NUM_WORDS, frame_check};
