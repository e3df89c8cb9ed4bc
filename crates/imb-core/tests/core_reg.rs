//! Core primitives regression test
//!
//! Checks the codeword tables, the packed number and the frame check
//! sequence against values worked out by hand from USPS-B-3200.

use imb_core::codeword::{WEIGHT_FIVE, WEIGHT_TWO};
use imb_core::{BarPattern, CodewordTables, MpNumber, NUM_CODEWORDS, tables};
use imb_test::RegParams;

const SAMPLE: &str = "ATTFAATTFTADFDATDDADAATTTTTTTTADFFFFFDFAFATTDAADATDDDTADAFFDFDTFT";

#[test]
fn core_reg() {
    let mut rp = RegParams::new("core");

    // --- Test 1: table shape ---
    let t = tables();
    let sum: u64 = (0..NUM_CODEWORDS as u16)
        .map(|cw| u64::from(t.pattern(cw).unwrap_or(0)))
        .sum();
    rp.compare_values(4_152_837.0, sum as f64, 0.0);
    rp.compare_values(2730.0, t.decodable_count() as f64, 0.0);

    // --- Test 2: class boundaries ---
    rp.compare_values(47.0, t.pattern(2).unwrap() as f64, 0.0);
    rp.compare_values(7808.0, t.pattern(3).unwrap() as f64, 0.0);
    rp.compare_values(496.0, t.pattern(WEIGHT_FIVE.high).unwrap() as f64, 0.0);
    rp.compare_values(3.0, t.pattern(WEIGHT_TWO.low).unwrap() as f64, 0.0);
    rp.compare_values(6144.0, t.pattern(WEIGHT_TWO.low + 1).unwrap() as f64, 0.0);
    rp.compare_values(160.0, t.pattern(WEIGHT_TWO.high).unwrap() as f64, 0.0);

    // --- Test 3: a fresh build agrees with the shared tables ---
    let fresh = CodewordTables::build();
    let same = (0..8192u16).all(|p| fresh.codeword(p) == t.codeword(p));
    rp.compare_values(1.0, if same { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: packing 12 / 234 / 567094 / 987654321 ---
    let mut num = MpNumber::zero();
    num.multiply_add(10, 1);
    num.multiply_add(5, 2);
    num.multiply_add(1000, 234);
    num.multiply_add(1_000_000, 567_094);
    num.multiply_add(100_000, 0);
    num.multiply_add(10_000, 987_654_321);
    let expected_words = [0u16, 0, 0, 0, 200, 1637, 1080, 1313, 1792, 1201];
    for (e, a) in expected_words.iter().zip(num.words()) {
        rp.compare_values(*e as f64, *a as f64, 0.0);
    }
    rp.compare_values(1136.0, num.frame_check() as f64, 0.0);

    // --- Test 5: codewords by repeated division ---
    let mut rest = num;
    rp.compare_values(269.0, rest.divide_mod(636) as f64, 0.0);
    for expected in [1007.0, 980.0, 579.0, 833.0, 546.0, 2.0, 0.0, 0.0] {
        rp.compare_values(expected, rest.divide_mod(1365) as f64, 0.0);
    }
    rp.compare_values(1.0, if rest.is_zero() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: sample symbol characters ---
    let chars = BarPattern::parse(SAMPLE).unwrap().to_characters();
    let expected_chars = [4436.0, 31.0, 31.0, 47.0, 7051.0, 4797.0, 6491.0, 2595.0, 5162.0, 1130.0];
    for (e, a) in expected_chars.iter().zip(chars.iter()) {
        rp.compare_values(*e, *a as f64, 0.0);
    }

    assert!(rp.cleanup(), "core regression test failed");
}
