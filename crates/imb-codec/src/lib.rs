//! imb-codec - Intelligent Mail barcode encoder and decoder
//!
//! This crate converts between the 65-bar text form of an Intelligent
//! Mail barcode and its structured record:
//!
//! - [`encode`] - Validate an [`ImbFields`] record and render its bars
//! - [`decode`] / [`decode_with_options`] - Read a record back, repairing
//!   damaged input where a unique repair exists
//!
//! # Example
//!
//! ```
//! use imb_codec::{ImbFields, decode, encode};
//!
//! let fields = ImbFields::new("01", "234", "567094", "987654321")
//!     .with_zip("01234")
//!     .with_plus4("5678")
//!     .with_delivery_pt("91");
//! let bars = encode(&fields).unwrap();
//! assert_eq!(bars, "AADTFFDFTDADTAADAATFDTDDAAADDTDTTDAFADADDDTFFFDDTTTADFAAADFTDAADA");
//!
//! let decoded = decode(&bars).unwrap();
//! assert_eq!(decoded.fields, fields);
//! ```
//!
//! # Damaged input
//!
//! ```
//! use imb_codec::decode;
//!
//! // first bar lost its ascender
//! let decoded =
//!     decode("TTTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT").unwrap();
//! let repair = decoded.repair.unwrap();
//! assert_eq!(repair.suggest, "ATTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT");
//! assert_eq!(repair.damaged_positions(), vec![0]);
//! ```
//!
//! # See also
//!
//! USPS-B-3200, Intelligent Mail Barcode 4-State

mod decode;
mod encode;
mod error;
mod fields;
pub mod repair;
mod types;

pub use decode::{
    MAX_FIRST_CODEWORD, MAX_LAST_CODEWORD, decode, decode_characters, decode_pattern,
    decode_with_options,
};
pub use encode::{
    CODEWORD_RADIX, Codewords, FIRST_CODEWORD_OFFSET, LAST_CODEWORD_RADIX, encode,
    encode_pattern, number_to_characters, number_to_codewords, pack,
};
pub use error::{CodecError, CodecResult, ValidationError};
pub use fields::{ImbFields, RoutingPresence};
pub use repair::BitRepair;
pub use types::{DAMAGED_MESSAGE, DecodeOptions, Decoded, Repair};
