//! Encoder regression test
//!
//! Encodes the USPS-B-3200 sample records and an assorted record set and
//! compares the bars with the published or recorded symbols.

use imb_codec::{CodecError, ImbFields, ValidationError, encode};
use imb_test::{RegParams, load_test_vectors};

#[test]
fn encode_reg() {
    let mut rp = RegParams::new("encode");

    // --- Test 1: USPS samples, as one golden file ---
    let usps = load_test_vectors("usps.txt").expect("load usps.txt");
    let mut out = String::new();
    for v in &usps {
        let fields = ImbFields::from_codes(&v.tracking, &v.routing).expect("sample fields");
        out.push_str(&encode(&fields).expect("encode sample"));
        out.push('\n');
    }
    rp.write_data_and_check(out.as_bytes(), "txt")
        .expect("write encode output");

    // --- Test 2: every vector, bar for bar ---
    let records = load_test_vectors("records.txt").expect("load records.txt");
    for v in usps.iter().chain(&records) {
        let fields = ImbFields::from_codes(&v.tracking, &v.routing).expect("vector fields");
        let bars = encode(&fields).expect("encode vector");
        rp.compare_strings(&v.bars, &bars);
        rp.compare_strings(&v.tracking, &fields.tracking_code());
        rp.compare_strings(&v.routing, &fields.routing_code());
    }

    // --- Test 3: the first failing rule is reported ---
    let base = ImbFields::new("01", "234", "567094", "987654321");
    let cases = [
        (base.clone().with_zip("0123"), "Zip code must be 5 digits"),
        (base.clone().with_plus4("5678"), "Zip code is required if Zip Code plus4 is provided"),
        (base.clone().with_zip("01234").with_plus4("56789"), "plus4 must be 4 digits"),
        (
            base.clone().with_zip("01234").with_plus4("5678").with_delivery_pt("9"),
            "Delivery Point must be 2 digits",
        ),
        (ImbFields::new("0a", "234", "567094", "987654321"), "Barcode ID must be 2 digits"),
        (ImbFields::new("05", "234", "567094", "987654321"), "Second digit of Barcode ID must be 0-4"),
        (ImbFields::new("01", "2345", "567094", "987654321"), "Service Type must be 3 digits"),
        (ImbFields::new("01", "234", "5670", "98765432100"), "Mailer ID must be 6 or 9 digits"),
        (
            ImbFields::new("01", "234", "567094", "9876543210"),
            "Mailer ID and Serial Number together must be 15 digits",
        ),
    ];
    for (fields, message) in cases {
        match encode(&fields) {
            Err(err @ CodecError::Validation(_)) => {
                rp.compare_strings(message, &err.to_string());
            }
            other => {
                rp.check(false, &format!("expected validation error, got {:?}", other));
            }
        }
    }

    // --- Test 4: input is cleaned before validation ---
    let spaced = ImbFields::new("0 1", " 234", "567 094", "987654321 ").with_zip(" 01234");
    let clean = ImbFields::new("01", "234", "567094", "987654321").with_zip("01234");
    rp.compare_strings(&encode(&clean).unwrap(), &encode(&spaced).unwrap());
    rp.check(
        encode(&ImbFields::new("01", "234", "967094", "987654321"))
            == Err(CodecError::Validation(ValidationError::MailerIdPrefix)),
        "six-digit mailer id starting with 9 is rejected",
    );

    assert!(rp.cleanup(), "encode regression test failed");
}
