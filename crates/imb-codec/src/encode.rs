//! Record to bar pattern
//!
//! The fields are packed into one [`MpNumber`], split into ten codewords
//! by mixed-radix division (636 for the last, 1365 for the eight middle
//! ones), turned into 13-bit characters through the codeword table, and
//! finally spread over the bars.
//!
//! # See also
//!
//! USPS-B-3200, section 3.2 (encoding procedure)

use crate::error::CodecResult;
use crate::fields::{ImbFields, RoutingPresence, digits_value};
use imb_core::{BarPattern, CHAR_MASK, Characters, MpNumber, NUM_CHARACTERS, tables};
use tracing::trace;

/// Radix of the least significant codeword
pub const LAST_CODEWORD_RADIX: u32 = 636;

/// Radix of the middle codewords
pub const CODEWORD_RADIX: u32 = 1365;

/// Offset of the upper half of the first codeword, selected by bit 10 of
/// the frame check sequence
pub const FIRST_CODEWORD_OFFSET: u16 = 659;

/// Ten codeword indices, most significant first
pub type Codewords = [u16; NUM_CHARACTERS];

/// Encode a record as 65 bars of text.
///
/// The record is normalized and validated first.
///
/// # Example
///
/// ```
/// use imb_codec::{ImbFields, encode};
///
/// let fields = ImbFields::new("01", "234", "567094", "987654321");
/// let bars = encode(&fields).unwrap();
/// assert_eq!(bars, "ATTFATTDTTADTAATTDTDTATTDAFDDFADFDFTFFFFFTATFAAAATDFFTDAADFTFDTDT");
/// ```
pub fn encode(fields: &ImbFields) -> CodecResult<String> {
    Ok(encode_pattern(fields)?.to_string())
}

/// Encode a record as a [`BarPattern`].
pub fn encode_pattern(fields: &ImbFields) -> CodecResult<BarPattern> {
    let fields = fields.normalized();
    fields.validate()?;

    let num = pack(&fields);
    let chars = number_to_characters(&num)?;
    Ok(BarPattern::from_characters(&chars))
}

/// Pack validated fields into one number.
pub fn pack(fields: &ImbFields) -> MpNumber {
    let mut num = MpNumber::zero();
    let presence = fields.routing_presence();

    if presence != RoutingPresence::None {
        num.add(digits_value(&fields.zip));
    }
    if matches!(
        presence,
        RoutingPresence::ZipPlus4 | RoutingPresence::ZipPlus4Delivery
    ) {
        num.multiply_add(10_000, digits_value(&fields.plus4));
    }
    if presence == RoutingPresence::ZipPlus4Delivery {
        num.multiply_add(100, digits_value(&fields.delivery_pt));
    }
    num.add(presence.marker());

    let id = fields.barcode_id.as_bytes();
    num.multiply_add(10, u32::from(id[0] - b'0'));
    num.multiply_add(5, u32::from(id[1] - b'0'));
    num.multiply_add(1000, digits_value(&fields.service_type));

    let mailer_id = digits_value(&fields.mailer_id);
    let serial_num = digits_value(&fields.serial_num);
    if fields.mailer_id.len() == 6 {
        num.multiply_add(1_000_000, mailer_id);
        num.multiply_add(100_000, 0);
        num.multiply_add(10_000, serial_num);
    } else {
        num.multiply_add(10_000, 0);
        num.multiply_add(100_000, mailer_id);
        num.multiply_add(1_000_000, serial_num);
    }
    num
}

/// Split a packed number into codewords.
///
/// Returns the codewords and the frame check sequence of `num`. The
/// first codeword already carries the offset for FCS bit 10.
pub fn number_to_codewords(num: &MpNumber) -> (Codewords, u16) {
    let fcs = num.frame_check();
    let mut rest = *num;
    let mut cw = [0u16; NUM_CHARACTERS];

    cw[9] = (rest.divide_mod(LAST_CODEWORD_RADIX) as u16) << 1;
    for n in (1..9).rev() {
        cw[n] = rest.divide_mod(CODEWORD_RADIX) as u16;
    }
    let words = rest.words();
    cw[0] = ((u32::from(words[8]) << 11) | u32::from(words[9])) as u16;
    if fcs & (1 << 10) != 0 {
        cw[0] += FIRST_CODEWORD_OFFSET;
    }
    (cw, fcs)
}

/// Characters for a packed number, complemented where the FCS says so.
pub fn number_to_characters(num: &MpNumber) -> CodecResult<Characters> {
    let (cw, fcs) = number_to_codewords(num);
    trace!(?cw, fcs, "codewords");

    let tables = tables();
    let mut chars = [0u16; NUM_CHARACTERS];
    for (n, (ch, &codeword)) in chars.iter_mut().zip(cw.iter()).enumerate() {
        *ch = tables.pattern(codeword)?;
        if fcs & (1 << n) != 0 {
            *ch ^= CHAR_MASK;
        }
    }
    Ok(chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecError, ValidationError};

    const SAMPLE: &str = "ATTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT";

    #[test]
    fn test_encode_sample() {
        let fields = ImbFields::new("12", "234", "567094", "987654321");
        assert_eq!(encode(&fields).unwrap(), SAMPLE);
    }

    #[test]
    fn test_sample_codewords() {
        let fields = ImbFields::new("12", "234", "567094", "987654321");
        let num = pack(&fields);
        assert_eq!(num.words(), &[0, 0, 0, 0, 200, 1637, 1080, 1313, 1792, 1201]);
        let (cw, fcs) = number_to_codewords(&num);
        assert_eq!(fcs, 1136);
        // fcs bit 10 is set, so the first codeword moves up by 659
        assert_eq!(cw, [659, 0, 0, 2, 546, 833, 579, 980, 1007, 538]);
    }

    #[test]
    fn test_sample_characters() {
        let fields = ImbFields::new("12", "234", "567094", "987654321");
        let chars = number_to_characters(&pack(&fields)).unwrap();
        assert_eq!(chars, [4436, 31, 31, 47, 7051, 4797, 6491, 2595, 5162, 1130]);
    }

    #[test]
    fn test_encode_normalizes() {
        let fields = ImbFields::new(" 12", "2 34", "567094 ", "987\t654321");
        assert_eq!(encode(&fields).unwrap(), SAMPLE);
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let fields = ImbFields::new("12", "234", "567094", "98765432");
        assert_eq!(
            encode(&fields),
            Err(CodecError::Validation(ValidationError::SerialNumber))
        );
        let fields = ImbFields::new("12", "234", "567094", "987654321").with_plus4("1234");
        assert_eq!(
            encode(&fields),
            Err(CodecError::Validation(ValidationError::ZipRequired))
        );
    }

    #[test]
    fn test_routing_changes_symbol() {
        let base = ImbFields::new("01", "234", "567094", "987654321");
        let zip = base.clone().with_zip("00000");
        assert_ne!(encode(&base).unwrap(), encode(&zip).unwrap());
    }

    #[test]
    fn test_largest_record_fits() {
        let fields = ImbFields::new("94", "999", "999999999", "999999")
            .with_zip("99999")
            .with_plus4("9999")
            .with_delivery_pt("99");
        let (cw, _) = number_to_codewords(&pack(&fields));
        assert!(cw[0] <= 1317);
        assert!(cw[9] <= 1270);
        assert!(encode(&fields).is_ok());
    }
}
