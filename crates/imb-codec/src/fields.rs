//! Structured Intelligent Mail record
//!
//! The record is the 20-digit tracking code (barcode id, service type,
//! mailer id, serial number) plus an optional routing code of 5, 9 or 11
//! digits (zip, plus4, delivery point). Fields are held as digit strings
//! so that leading zeros survive a round trip; an empty string marks an
//! absent routing field.

use crate::error::{CodecError, CodecResult, ValidationError};
use imb_core::clean;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which routing fields a record carries.
///
/// Each level adds a fixed marker weight to the packed number, which is
/// how the decoder tells `01234` apart from no routing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoutingPresence {
    /// No routing code
    #[default]
    None,
    /// Zip only
    Zip,
    /// Zip and plus4
    ZipPlus4,
    /// Zip, plus4 and delivery point
    ZipPlus4Delivery,
}

impl RoutingPresence {
    /// Marker weight added before the tracking fields are packed.
    pub fn marker(self) -> u32 {
        match self {
            RoutingPresence::None => 0,
            RoutingPresence::Zip => 1,
            RoutingPresence::ZipPlus4 => 1 + 100_000,
            RoutingPresence::ZipPlus4Delivery => 1 + 100_000 + 1_000_000_000,
        }
    }

    /// Number of routing digits.
    pub fn digits(self) -> usize {
        match self {
            RoutingPresence::None => 0,
            RoutingPresence::Zip => 5,
            RoutingPresence::ZipPlus4 => 9,
            RoutingPresence::ZipPlus4Delivery => 11,
        }
    }

    /// Presence level for a routing code length.
    pub fn from_digits(digits: usize) -> Option<Self> {
        match digits {
            0 => Some(RoutingPresence::None),
            5 => Some(RoutingPresence::Zip),
            9 => Some(RoutingPresence::ZipPlus4),
            11 => Some(RoutingPresence::ZipPlus4Delivery),
            _ => None,
        }
    }
}

/// Tracking and routing fields of one mail piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImbFields {
    /// 2 digits, second digit 0-4
    pub barcode_id: String,
    /// 3 digits
    pub service_type: String,
    /// 6 or 9 digits
    pub mailer_id: String,
    /// 9 or 6 digits, so that mailer id and serial number total 15
    pub serial_num: String,
    /// 5 digits or empty
    #[cfg_attr(feature = "serde", serde(default))]
    pub zip: String,
    /// 4 digits or empty
    #[cfg_attr(feature = "serde", serde(default))]
    pub plus4: String,
    /// 2 digits or empty
    #[cfg_attr(feature = "serde", serde(default))]
    pub delivery_pt: String,
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Value of a digit string already checked by [`is_digits`].
pub(crate) fn digits_value(s: &str) -> u32 {
    s.bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b.wrapping_sub(b'0')))
}

impl ImbFields {
    /// Create a record with the mandatory tracking fields and no routing.
    pub fn new(barcode_id: &str, service_type: &str, mailer_id: &str, serial_num: &str) -> Self {
        Self {
            barcode_id: barcode_id.to_string(),
            service_type: service_type.to_string(),
            mailer_id: mailer_id.to_string(),
            serial_num: serial_num.to_string(),
            ..Default::default()
        }
    }

    /// Sets the zip code
    pub fn with_zip(mut self, zip: &str) -> Self {
        self.zip = zip.to_string();
        self
    }

    /// Sets the plus4 code
    pub fn with_plus4(mut self, plus4: &str) -> Self {
        self.plus4 = plus4.to_string();
        self
    }

    /// Sets the delivery point
    pub fn with_delivery_pt(mut self, delivery_pt: &str) -> Self {
        self.delivery_pt = delivery_pt.to_string();
        self
    }

    /// Split a 20-digit tracking code and a routing code into fields.
    ///
    /// The mailer id is nine digits when the sixth tracking digit is 9,
    /// six otherwise. The result is validated.
    pub fn from_codes(tracking: &str, routing: &str) -> CodecResult<Self> {
        let tracking = clean(tracking);
        let routing = clean(routing);
        if !is_digits(&tracking, 20) {
            return Err(CodecError::from(ValidationError::TrackingCode));
        }
        if !routing.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::from(ValidationError::RoutingCode));
        }
        let presence =
            RoutingPresence::from_digits(routing.len()).ok_or(ValidationError::RoutingCode)?;

        let mailer_len = if tracking.as_bytes()[5] == b'9' { 9 } else { 6 };
        let mut fields = Self::new(
            &tracking[0..2],
            &tracking[2..5],
            &tracking[5..5 + mailer_len],
            &tracking[5 + mailer_len..],
        );

        if presence != RoutingPresence::None {
            fields.zip = routing[0..5].to_string();
        }
        if matches!(
            presence,
            RoutingPresence::ZipPlus4 | RoutingPresence::ZipPlus4Delivery
        ) {
            fields.plus4 = routing[5..9].to_string();
        }
        if presence == RoutingPresence::ZipPlus4Delivery {
            fields.delivery_pt = routing[9..11].to_string();
        }

        fields.validate()?;
        Ok(fields)
    }

    /// Copy of the record with every field uppercased and stripped of
    /// whitespace.
    pub fn normalized(&self) -> Self {
        Self {
            barcode_id: clean(&self.barcode_id),
            service_type: clean(&self.service_type),
            mailer_id: clean(&self.mailer_id),
            serial_num: clean(&self.serial_num),
            zip: clean(&self.zip),
            plus4: clean(&self.plus4),
            delivery_pt: clean(&self.delivery_pt),
        }
    }

    /// Check every field, reporting the first rule that fails.
    ///
    /// Expects a [`normalized`](Self::normalized) record; whitespace is
    /// not skipped here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.zip.is_empty() && !is_digits(&self.zip, 5) {
            return Err(ValidationError::Zip);
        }
        if !self.plus4.is_empty() {
            if self.zip.is_empty() {
                return Err(ValidationError::ZipRequired);
            }
            if !is_digits(&self.plus4, 4) {
                return Err(ValidationError::Plus4);
            }
        }
        if !self.delivery_pt.is_empty() {
            if !is_digits(&self.delivery_pt, 2) {
                return Err(ValidationError::DeliveryPoint);
            }
            if self.plus4.is_empty() {
                return Err(ValidationError::Plus4Required);
            }
        }

        if !is_digits(&self.barcode_id, 2) {
            return Err(ValidationError::BarcodeId);
        }
        if self.barcode_id.as_bytes()[1] >= b'5' {
            return Err(ValidationError::BarcodeIdSecondDigit);
        }
        if !is_digits(&self.service_type, 3) {
            return Err(ValidationError::ServiceType);
        }
        if !is_digits(&self.mailer_id, 6) && !is_digits(&self.mailer_id, 9) {
            return Err(ValidationError::MailerId);
        }
        if self.mailer_id.starts_with('9') != (self.mailer_id.len() == 9) {
            return Err(ValidationError::MailerIdPrefix);
        }
        if self.serial_num.is_empty()
            || !self.serial_num.bytes().all(|b| b.is_ascii_digit())
            || self.mailer_id.len() + self.serial_num.len() != 15
        {
            return Err(ValidationError::SerialNumber);
        }
        Ok(())
    }

    /// Which routing fields are present.
    pub fn routing_presence(&self) -> RoutingPresence {
        match (
            self.zip.is_empty(),
            self.plus4.is_empty(),
            self.delivery_pt.is_empty(),
        ) {
            (true, _, _) => RoutingPresence::None,
            (false, true, _) => RoutingPresence::Zip,
            (false, false, true) => RoutingPresence::ZipPlus4,
            (false, false, false) => RoutingPresence::ZipPlus4Delivery,
        }
    }

    /// The 20-digit tracking code.
    pub fn tracking_code(&self) -> String {
        [
            self.barcode_id.as_str(),
            &self.service_type,
            &self.mailer_id,
            &self.serial_num,
        ]
        .concat()
    }

    /// The routing code: empty, zip, zip+plus4 or zip+plus4+delivery point.
    pub fn routing_code(&self) -> String {
        [self.zip.as_str(), &self.plus4, &self.delivery_pt].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImbFields {
        ImbFields::new("01", "234", "567094", "987654321")
    }

    #[test]
    fn test_valid_records() {
        assert_eq!(sample().validate(), Ok(()));
        let full = sample()
            .with_zip("01234")
            .with_plus4("5678")
            .with_delivery_pt("91");
        assert_eq!(full.validate(), Ok(()));
        assert_eq!(full.routing_presence(), RoutingPresence::ZipPlus4Delivery);
        assert_eq!(ImbFields::new("04", "700", "901234567", "000001").validate(), Ok(()));
    }

    #[test]
    fn test_validation_order() {
        let cases = [
            (sample().with_zip("1234"), ValidationError::Zip),
            (sample().with_plus4("5678"), ValidationError::ZipRequired),
            (sample().with_zip("01234").with_plus4("567"), ValidationError::Plus4),
            (sample().with_zip("01234").with_delivery_pt("9"), ValidationError::DeliveryPoint),
            (sample().with_zip("01234").with_delivery_pt("91"), ValidationError::Plus4Required),
            (ImbFields::new("1", "234", "567094", "987654321"), ValidationError::BarcodeId),
            (ImbFields::new("15", "234", "567094", "987654321"), ValidationError::BarcodeIdSecondDigit),
            (ImbFields::new("01", "23", "567094", "987654321"), ValidationError::ServiceType),
            (ImbFields::new("01", "234", "5670941", "98765432"), ValidationError::MailerId),
            (ImbFields::new("01", "234", "967094", "987654321"), ValidationError::MailerIdPrefix),
            (ImbFields::new("01", "234", "567094123", "987654"), ValidationError::MailerIdPrefix),
            (ImbFields::new("01", "234", "567094", "98765432"), ValidationError::SerialNumber),
            (ImbFields::new("01", "234", "567094", ""), ValidationError::SerialNumber),
            (ImbFields::new("01", "234", "567094", "98765432x"), ValidationError::SerialNumber),
        ];
        for (fields, expected) in cases {
            assert_eq!(fields.validate(), Err(expected), "{:?}", fields);
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let fields = ImbFields::new("9", "", "", "").with_zip("1");
        assert_eq!(fields.validate(), Err(ValidationError::Zip));
    }

    #[test]
    fn test_normalized() {
        let fields = ImbFields::new(" 0 1", "234\n", "567 094", "987654321").with_zip(" 01234 ");
        let clean = fields.normalized();
        assert_eq!(clean.barcode_id, "01");
        assert_eq!(clean.mailer_id, "567094");
        assert_eq!(clean.zip, "01234");
        assert_eq!(clean.validate(), Ok(()));
        assert_eq!(fields.validate(), Err(ValidationError::Zip));
    }

    #[test]
    fn test_codes() {
        let full = sample()
            .with_zip("01234")
            .with_plus4("5678")
            .with_delivery_pt("91");
        assert_eq!(full.tracking_code(), "01234567094987654321");
        assert_eq!(full.routing_code(), "01234567891");

        let parsed = ImbFields::from_codes("01234567094987654321", "01234567891").unwrap();
        assert_eq!(parsed, full);

        let nine = ImbFields::from_codes("01 234 901234567 000001", "").unwrap();
        assert_eq!(nine.mailer_id, "901234567");
        assert_eq!(nine.serial_num, "000001");
        assert_eq!(nine.routing_presence(), RoutingPresence::None);
    }

    #[test]
    fn test_codes_errors() {
        assert_eq!(
            ImbFields::from_codes("0123456709498765432", ""),
            Err(CodecError::from(ValidationError::TrackingCode))
        );
        assert_eq!(
            ImbFields::from_codes("01234567094987654321", "012345"),
            Err(CodecError::from(ValidationError::RoutingCode))
        );
        assert_eq!(
            ImbFields::from_codes("05234567094987654321", ""),
            Err(CodecError::from(ValidationError::BarcodeIdSecondDigit))
        );
    }

    #[test]
    fn test_presence_markers() {
        assert_eq!(RoutingPresence::None.marker(), 0);
        assert_eq!(RoutingPresence::ZipPlus4.marker(), 100_001);
        assert_eq!(RoutingPresence::ZipPlus4Delivery.marker(), 1_000_100_001);
        for p in [
            RoutingPresence::None,
            RoutingPresence::Zip,
            RoutingPresence::ZipPlus4,
            RoutingPresence::ZipPlus4Delivery,
        ] {
            assert_eq!(RoutingPresence::from_digits(p.digits()), Some(p));
        }
        assert_eq!(RoutingPresence::from_digits(4), None);
    }

    #[test]
    fn test_digits_value() {
        assert_eq!(digits_value("000123"), 123);
        assert_eq!(digits_value("999999999"), 999_999_999);
    }
}
