//! imb - USPS Intelligent Mail barcode for Rust
//!
//! Converts between the 65-bar text form of an Intelligent Mail barcode
//! (`A`scender, `D`escender, `F`ull, `T`racker) and the tracking and
//! routing fields it carries. Damaged symbols are repaired when exactly
//! one repair fits.
//!
//! # Example
//!
//! ```
//! use imb::{ImbFields, decode, encode};
//!
//! let fields = ImbFields::new("01", "234", "567094", "987654321").with_zip("01234");
//! let bars = encode(&fields).unwrap();
//! assert_eq!(bars, "DTTAFADDTTFTDTFTFDTDDADADAFADFATDDFTAAAFDTTADFAAATDFDTDFADDDTDFFT");
//!
//! let decoded = decode(&bars).unwrap();
//! assert_eq!(decoded.fields, fields);
//! assert_eq!(decoded.fields.routing_code(), "01234");
//! ```

// Re-export core types (bars, tables, numbers)
pub use imb_core::*;

// Re-export the codec surface
pub use imb_codec::{
    CodecError, CodecResult, DecodeOptions, Decoded, ImbFields, Repair, RoutingPresence,
    ValidationError, decode, decode_with_options, encode,
};

// The rest of the codec as a module
pub use imb_codec as codec;
