//! Error types for imb-codec

use thiserror::Error;

/// A structured record that cannot be encoded.
///
/// The display text of each variant is the message shown to the user;
/// validation stops at the first rule that fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Zip code must be 5 digits")]
    Zip,

    #[error("Zip code is required if Zip Code plus4 is provided")]
    ZipRequired,

    #[error("plus4 must be 4 digits")]
    Plus4,

    #[error("Delivery Point must be 2 digits")]
    DeliveryPoint,

    #[error("Zip Code plus4 is required if Delivery Point is provided")]
    Plus4Required,

    #[error("Barcode ID must be 2 digits")]
    BarcodeId,

    #[error("Second digit of Barcode ID must be 0-4")]
    BarcodeIdSecondDigit,

    #[error("Service Type must be 3 digits")]
    ServiceType,

    #[error("Mailer ID must be 6 or 9 digits")]
    MailerId,

    /// Six-digit ids never start with 9; nine-digit ids always do
    #[error("Mailer ID must begin with 9 if and only if it is 9 digits")]
    MailerIdPrefix,

    #[error("Mailer ID and Serial Number together must be 15 digits")]
    SerialNumber,

    #[error("Tracking code must be 20 digits")]
    TrackingCode,

    #[error("Routing code must be 0, 5, 9 or 11 digits")]
    RoutingCode,
}

/// Errors that can occur while encoding or decoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imb_core::Error),

    /// Record failed validation before encoding
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Symbol text does not have 65 bars, even after length repair
    #[error("barcode must be 65 characters long (got {0})")]
    InvalidLength(usize),

    /// No record matches the bars
    #[error("invalid barcode")]
    InvalidBarcode,

    /// Characters decode but the frame check sequence disagrees
    #[error("invalid barcode: frame check mismatch (computed {computed:#05x}, read {read:#05x})")]
    FrameCheckMismatch { computed: u16, read: u16 },

    /// The bars decode once turned upside down
    #[error("barcode seems to be upside down")]
    UpsideDown,

    /// More than one single-bit repair yields a valid record
    #[error("invalid barcode: damage admits more than one repair")]
    AmbiguousRepair,

    /// Too many damaged characters to search for a repair
    #[error("invalid barcode: too many damaged characters to repair")]
    Unrecoverable,

    /// Invalid decode option
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CodecError {
    /// True for errors about the shape of the input text rather than its
    /// content: wrong length, unknown symbols, or damage too extensive
    /// to search.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidLength(_) | CodecError::Unrecoverable | CodecError::Core(_)
        )
    }

    /// True for errors reported to the user as a plain invalid barcode.
    pub fn is_invalid_barcode(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidBarcode
                | CodecError::FrameCheckMismatch { .. }
                | CodecError::AmbiguousRepair
        )
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
