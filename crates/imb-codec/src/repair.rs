//! Damage repair
//!
//! Three steps run in order on a symbol the exact path rejected:
//!
//! 1. Length: a symbol one bar short or one bar long is tried with a
//!    placeholder inserted, or one bar deleted, at every position. The
//!    variant with the fewest characters that are not codewords wins.
//! 2. Bits: every character that is not a codeword is replaced by each
//!    single-bit neighbour that is one, and the combinations are searched
//!    for records that pass the frame check. Exactly one must be found.
//! 3. Orientation: if nothing was found, the bits step is repeated with
//!    ascenders and descenders swapped. Success there means the symbol
//!    was read upside down.
//!
//! Unknown symbols, including the placeholder, contribute no ascender or
//! descender.

use crate::decode::decode_characters;
use crate::error::{CodecError, CodecResult};
use crate::fields::ImbFields;
use crate::types::{DAMAGED_MESSAGE, DecodeOptions, Decoded, Repair};
use imb_core::{Bar, BarPattern, Characters, NUM_BARS, NUM_CHARACTERS, tables};
use tracing::{debug, trace};

/// Symbol inserted into a symbol one bar short
pub const PLACEHOLDER: char = 'X';

/// Outcome of the bit repair search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitRepair {
    /// Exactly one combination decodes
    Unique {
        fields: ImbFields,
        chars: Characters,
    },
    /// Two or more combinations decode
    Ambiguous,
    /// No combination decodes
    NotFound,
    /// A character has no codeword neighbour, or there are too many
    /// combinations to search
    Infeasible,
}

/// Run the repair steps on cleaned text.
pub(crate) fn repair(text: &str, options: &DecodeOptions) -> CodecResult<Decoded> {
    let candidate = fix_length(text, options.max_length_errors);
    let count = candidate.chars().count();
    if count != NUM_BARS {
        return Err(CodecError::InvalidLength(count));
    }
    let pattern = BarPattern::parse_lenient(&candidate)?;

    let outcome = fix_bits(&pattern.to_characters(), options.max_candidates);
    let infeasible = outcome == BitRepair::Infeasible;
    match outcome {
        BitRepair::Unique { fields, chars } => {
            let suggest = BarPattern::from_characters(&chars).to_string();
            let highlight = highlight(&candidate, &suggest);
            debug!(%suggest, "repaired damaged barcode");
            return Ok(Decoded::repaired(
                fields,
                Repair {
                    suggest,
                    highlight,
                    message: DAMAGED_MESSAGE.to_string(),
                },
            ));
        }
        BitRepair::Ambiguous => {
            debug!("repair is ambiguous");
            return Err(CodecError::AmbiguousRepair);
        }
        BitRepair::NotFound | BitRepair::Infeasible => {}
    }

    if options.detect_orientation {
        let flipped = pattern.flipped();
        let outcome = fix_bits(&flipped.to_characters(), options.max_candidates);
        if matches!(outcome, BitRepair::Unique { .. }) {
            debug!("barcode decodes upside down");
            return Err(CodecError::UpsideDown);
        }
    }

    if infeasible {
        Err(CodecError::Unrecoverable)
    } else {
        Err(CodecError::InvalidBarcode)
    }
}

/// Bring text of 64 or 66 symbols to 65 by one insertion or deletion.
///
/// Every position is tried; the first variant whose count of unresolved
/// characters is below `cutoff` and below every earlier variant wins.
/// Text of any other length, or with no variant under the cutoff, is
/// returned unchanged.
pub fn fix_length(text: &str, cutoff: usize) -> String {
    let symbols: Vec<char> = text.chars().collect();
    let insert = match symbols.len() {
        n if n + 1 == NUM_BARS => true,
        n if n == NUM_BARS + 1 => false,
        _ => return text.to_string(),
    };

    let mut best = text.to_string();
    let mut best_errors = cutoff;
    for pos in 0..symbols.len() + usize::from(insert) {
        let mut variant = symbols.clone();
        if insert {
            variant.insert(pos, PLACEHOLDER);
        } else {
            variant.remove(pos);
        }
        let variant: String = variant.into_iter().collect();
        let errors = unresolved_characters(&variant);
        trace!(pos, errors, "length variant");
        if errors < best_errors {
            best_errors = errors;
            best = variant;
        }
    }

    if best_errors < cutoff {
        debug!(errors = best_errors, "length repaired");
    }
    best
}

/// Number of characters of a 65-symbol text that are not codewords.
fn unresolved_characters(text: &str) -> usize {
    match BarPattern::parse_lenient(text) {
        Ok(pattern) => {
            let tables = tables();
            pattern
                .to_characters()
                .iter()
                .filter(|&&ch| !tables.is_codeword(ch))
                .count()
        }
        Err(_) => usize::MAX,
    }
}

/// Search single-bit corrections of the characters for a unique record.
///
/// Characters that are codewords are kept; each other character is
/// replaced by its codeword neighbours at Hamming distance one. The search
/// stops at the second record found.
pub fn fix_bits(chars: &Characters, max_candidates: usize) -> BitRepair {
    let tables = tables();
    let mut candidates: Vec<Vec<u16>> = Vec::with_capacity(NUM_CHARACTERS);
    let mut product = 1usize;

    for &ch in chars {
        let options: Vec<u16> = if tables.is_codeword(ch) {
            vec![ch]
        } else {
            (0..13u16)
                .map(|bit| ch ^ (1u16 << bit))
                .filter(|&p| tables.is_codeword(p))
                .collect()
        };
        product = product.saturating_mul(options.len());
        if product == 0 || product > max_candidates {
            debug!(product, "bit repair infeasible");
            return BitRepair::Infeasible;
        }
        candidates.push(options);
    }
    trace!(product, "bit repair candidates");

    let mut search = Search {
        candidates: &candidates,
        current: [0; NUM_CHARACTERS],
        found: None,
        ambiguous: false,
    };
    search.visit(0);

    match (search.found, search.ambiguous) {
        (_, true) => BitRepair::Ambiguous,
        (Some((fields, chars)), false) => BitRepair::Unique { fields, chars },
        (None, false) => BitRepair::NotFound,
    }
}

struct Search<'a> {
    candidates: &'a [Vec<u16>],
    current: Characters,
    found: Option<(ImbFields, Characters)>,
    ambiguous: bool,
}

impl Search<'_> {
    fn visit(&mut self, depth: usize) {
        if self.ambiguous {
            return;
        }
        if depth == NUM_CHARACTERS {
            if let Ok(fields) = decode_characters(&self.current) {
                if self.found.is_some() {
                    self.ambiguous = true;
                } else {
                    self.found = Some((fields, self.current));
                }
            }
            return;
        }
        let candidates = self.candidates;
        for &ch in &candidates[depth] {
            self.current[depth] = ch;
            self.visit(depth + 1);
        }
    }
}

/// Per bar, whether `text` differs from `suggest`.
///
/// `S` and `T` count as the same bar; anything outside the alphabet
/// differs.
fn highlight(text: &str, suggest: &str) -> Vec<bool> {
    text.chars()
        .zip(suggest.chars())
        .map(|(t, s)| Bar::from_symbol(t) != Bar::from_symbol(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;

    const SAMPLE: &str = "ATTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT";

    fn with_symbol(pos: usize, symbol: char) -> String {
        let mut s: Vec<char> = SAMPLE.chars().collect();
        s[pos] = symbol;
        s.into_iter().collect()
    }

    #[test]
    fn test_single_bar_damage() {
        let decoded = decode(&with_symbol(0, 'T')).unwrap();
        let repair = decoded.repair.as_ref().unwrap();
        assert_eq!(repair.suggest, SAMPLE);
        assert_eq!(repair.damaged_positions(), vec![0]);
        assert_eq!(repair.message, "Damaged barcode");
        assert_eq!(decoded.fields, decode(SAMPLE).unwrap().fields);
    }

    #[test]
    fn test_unknown_symbol() {
        let decoded = decode(&with_symbol(0, 'X')).unwrap();
        let repair = decoded.repair.unwrap();
        assert_eq!(repair.suggest, SAMPLE);
        assert_eq!(repair.damaged_positions(), vec![0]);
    }

    #[test]
    fn test_fix_length_insert() {
        let short: String = SAMPLE
            .chars()
            .enumerate()
            .filter_map(|(i, c)| (i != 10).then_some(c))
            .collect();
        let fixed = fix_length(&short, 5);
        assert_eq!(
            fixed,
            "ATTFAATTFXTDFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT"
        );
    }

    #[test]
    fn test_fix_length_other_lengths() {
        assert_eq!(fix_length(&SAMPLE[..60], 5), &SAMPLE[..60]);
        assert_eq!(fix_length(SAMPLE, 5), SAMPLE);
        // a zero cutoff never accepts a variant
        assert_eq!(fix_length(&SAMPLE[..64], 0), &SAMPLE[..64]);
    }

    #[test]
    fn test_fix_bits_keeps_valid_characters() {
        let chars = BarPattern::parse(SAMPLE).unwrap().to_characters();
        match fix_bits(&chars, 1000) {
            BitRepair::Unique { chars: fixed, .. } => assert_eq!(fixed, chars),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fix_bits_infeasible() {
        let chars = BarPattern::parse(&"T".repeat(65)).unwrap().to_characters();
        assert_eq!(fix_bits(&chars, 1000), BitRepair::Infeasible);

        // a single damaged character fails a bound of one candidate
        let mut chars = BarPattern::parse(SAMPLE).unwrap().to_characters();
        chars[4] ^= 1;
        assert_eq!(fix_bits(&chars, 1), BitRepair::Infeasible);
    }

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("ATSX", "ATTT"), vec![false, false, false, true]);
    }
}
