//! Decode options and results

use crate::error::{CodecError, CodecResult};
use crate::fields::ImbFields;
use imb_core::NUM_CHARACTERS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Message attached to every repaired decode
pub const DAMAGED_MESSAGE: &str = "Damaged barcode";

/// Options for decoding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeOptions {
    /// Fall back to repair when the exact decode fails
    pub repair: bool,
    /// Length repair keeps a variant only if it has fewer unresolved
    /// characters than this (typically 5)
    pub max_length_errors: usize,
    /// Bit repair gives up when the candidate product exceeds this
    /// (typically 1000)
    pub max_candidates: usize,
    /// Report upside-down symbols as such
    pub detect_orientation: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            repair: true,
            max_length_errors: 5,
            max_candidates: 1000,
            detect_orientation: true,
        }
    }
}

impl DecodeOptions {
    /// Creates default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that only accept an undamaged symbol
    pub fn strict() -> Self {
        Self {
            repair: false,
            ..Self::default()
        }
    }

    /// Enables or disables the repair fallback
    pub fn with_repair(mut self, repair: bool) -> Self {
        self.repair = repair;
        self
    }

    /// Sets the length repair cutoff
    pub fn with_max_length_errors(mut self, max: usize) -> Self {
        self.max_length_errors = max;
        self
    }

    /// Sets the bit repair search bound
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Enables or disables upside-down detection
    pub fn with_detect_orientation(mut self, detect: bool) -> Self {
        self.detect_orientation = detect;
        self
    }

    /// Validate options
    pub fn validate(&self) -> CodecResult<()> {
        if self.max_length_errors > NUM_CHARACTERS + 1 {
            return Err(CodecError::InvalidParameter(format!(
                "max_length_errors must be at most {}",
                NUM_CHARACTERS + 1
            )));
        }
        if self.max_candidates == 0 {
            return Err(CodecError::InvalidParameter(
                "max_candidates must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// What the repair subsystem changed to reach a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Repair {
    /// The corrected bar text
    pub suggest: String,
    /// Per bar, whether the length-corrected input differs from `suggest`
    pub highlight: Vec<bool>,
    /// Human readable note
    pub message: String,
}

impl Repair {
    /// Positions marked in `highlight`.
    pub fn damaged_positions(&self) -> Vec<usize> {
        self.highlight
            .iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(i))
            .collect()
    }
}

/// A decoded record, with the repair that produced it if any.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decoded {
    /// The record
    pub fields: ImbFields,
    /// Present when the input was damaged
    pub repair: Option<Repair>,
}

impl Decoded {
    /// A record read from an undamaged symbol
    pub fn exact(fields: ImbFields) -> Self {
        Self {
            fields,
            repair: None,
        }
    }

    /// A record recovered by repair
    pub fn repaired(fields: ImbFields, repair: Repair) -> Self {
        Self {
            fields,
            repair: Some(repair),
        }
    }

    /// Whether repair was needed
    pub fn is_repaired(&self) -> bool {
        self.repair.is_some()
    }

    /// The corrected bar text, for a repaired decode
    pub fn suggest(&self) -> Option<&str> {
        self.repair.as_ref().map(|r| r.suggest.as_str())
    }
}
