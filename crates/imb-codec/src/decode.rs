//! Bar pattern to record
//!
//! The exact path reverses the encoder step for step. When it fails, the
//! [`repair`](crate::repair) fallback takes over unless the options turn
//! it off.
//!
//! # See also
//!
//! USPS-B-3200, section 3.3 (decoding)

use crate::encode::{CODEWORD_RADIX, Codewords, FIRST_CODEWORD_OFFSET, LAST_CODEWORD_RADIX};
use crate::error::{CodecError, CodecResult};
use crate::fields::{ImbFields, RoutingPresence};
use crate::repair;
use crate::types::{DecodeOptions, Decoded};
use imb_core::{BarPattern, Characters, MpNumber, NUM_BARS, NUM_CHARACTERS, clean, tables};
use tracing::{debug, trace};

/// Largest first codeword, including the FCS offset
pub const MAX_FIRST_CODEWORD: u16 = 1317;

/// Largest last codeword, before halving
pub const MAX_LAST_CODEWORD: u16 = 1270;

/// Routing digit blocks, least significant first
const ROUTING_BLOCKS: [usize; 3] = [5, 4, 2];

const TRACKING_DIGITS: usize = 20;
const ROUTING_DIGITS: usize = 11;

/// Decode bar text with default options.
///
/// # Example
///
/// ```
/// use imb_codec::decode;
///
/// let decoded =
///     decode("ATTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT").unwrap();
/// assert_eq!(decoded.fields.barcode_id, "12");
/// assert_eq!(decoded.fields.serial_num, "987654321");
/// assert!(decoded.repair.is_none());
/// ```
pub fn decode(text: &str) -> CodecResult<Decoded> {
    decode_with_options(text, &DecodeOptions::default())
}

/// Decode bar text.
///
/// The text is uppercased and stripped of whitespace. A symbol that does
/// not decode exactly goes through repair when `options.repair` is set;
/// otherwise the exact-path error is returned.
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> CodecResult<Decoded> {
    options.validate()?;

    let text = clean(text);
    let count = text.chars().count();
    let exact = if count == NUM_BARS {
        BarPattern::parse(&text)
            .map_err(CodecError::from)
            .and_then(|pattern| decode_pattern(&pattern))
    } else {
        Err(CodecError::InvalidLength(count))
    };

    match exact {
        Ok(fields) => Ok(Decoded::exact(fields)),
        Err(err) if !options.repair => Err(err),
        Err(err) => {
            debug!(%err, "exact decode failed, trying repair");
            repair::repair(&text, options)
        }
    }
}

/// Decode a parsed pattern, without repair.
pub fn decode_pattern(pattern: &BarPattern) -> CodecResult<ImbFields> {
    decode_characters(&pattern.to_characters())
}

/// Decode ten characters, without repair.
///
/// # Errors
///
/// [`CodecError::InvalidBarcode`] when a character is not a codeword, a
/// codeword is out of range, or the last codeword is odd (the mark of a
/// symbol read upside down); [`CodecError::FrameCheckMismatch`] when the
/// frame check sequence disagrees.
pub fn decode_characters(chars: &Characters) -> CodecResult<ImbFields> {
    let (cw, fcs) = characters_to_codewords(chars)?;
    let num = codewords_to_number(&cw);

    let computed = num.frame_check();
    if computed != fcs {
        trace!(computed, read = fcs, "frame check mismatch");
        return Err(CodecError::FrameCheckMismatch {
            computed,
            read: fcs,
        });
    }
    unpack(num)
}

/// Look up the codewords and read the frame check sequence.
///
/// The returned codewords are normalized: the last one halved and the
/// first one with its FCS offset removed.
fn characters_to_codewords(chars: &Characters) -> CodecResult<(Codewords, u16)> {
    let tables = tables();
    let mut cw = [0u16; NUM_CHARACTERS];
    let mut fcs = 0u16;

    for (n, &ch) in chars.iter().enumerate() {
        cw[n] = tables.codeword(ch).ok_or_else(|| {
            trace!(position = n, pattern = ch, "not a codeword");
            CodecError::InvalidBarcode
        })?;
        fcs |= u16::from(tables.fcs_bit(ch)) << n;
    }

    if cw[0] > MAX_FIRST_CODEWORD || cw[9] > MAX_LAST_CODEWORD {
        trace!(first = cw[0], last = cw[9], "codeword out of range");
        return Err(CodecError::InvalidBarcode);
    }
    if cw[9] & 1 != 0 {
        trace!(last = cw[9], "odd last codeword");
        return Err(CodecError::InvalidBarcode);
    }

    cw[9] >>= 1;
    if cw[0] >= FIRST_CODEWORD_OFFSET {
        cw[0] -= FIRST_CODEWORD_OFFSET;
        fcs |= 1 << 10;
    }
    Ok((cw, fcs))
}

fn codewords_to_number(cw: &Codewords) -> MpNumber {
    let mut num = MpNumber::zero();
    num.add(u32::from(cw[0]));
    for &c in &cw[1..9] {
        num.multiply_add(CODEWORD_RADIX, u32::from(c));
    }
    num.multiply_add(LAST_CODEWORD_RADIX, u32::from(cw[9]));
    num
}

/// Split a packed number back into fields.
fn unpack(mut num: MpNumber) -> CodecResult<ImbFields> {
    let mut tracking = [0u8; TRACKING_DIGITS];
    for digit in tracking[2..].iter_mut().rev() {
        *digit = num.divide_mod(10) as u8;
    }
    tracking[1] = num.divide_mod(5) as u8;
    tracking[0] = num.divide_mod(10) as u8;

    let mut routing = [0u8; ROUTING_DIGITS];
    let mut pos = ROUTING_DIGITS;
    let mut complete = true;
    for size in ROUTING_BLOCKS {
        if num.is_zero() {
            complete = false;
            break;
        }
        // each block is offset by one marker unit
        num.sub(1);
        for _ in 0..size {
            pos -= 1;
            routing[pos] = num.divide_mod(10) as u8;
        }
    }
    if complete && !num.is_zero() {
        trace!("routing value too large");
        return Err(CodecError::InvalidBarcode);
    }

    let presence =
        RoutingPresence::from_digits(ROUTING_DIGITS - pos).ok_or(CodecError::InvalidBarcode)?;
    let routing = digit_string(&routing[pos..]);
    let tracking = digit_string(&tracking);

    let mailer_len = if tracking.as_bytes()[5] == b'9' { 9 } else { 6 };
    let mut fields = ImbFields::new(
        &tracking[0..2],
        &tracking[2..5],
        &tracking[5..5 + mailer_len],
        &tracking[5 + mailer_len..],
    );
    if presence != RoutingPresence::None {
        fields.zip = routing[0..5].to_string();
    }
    if presence.digits() >= 9 {
        fields.plus4 = routing[5..9].to_string();
    }
    if presence == RoutingPresence::ZipPlus4Delivery {
        fields.delivery_pt = routing[9..11].to_string();
    }
    Ok(fields)
}

fn digit_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}
