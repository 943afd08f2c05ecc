//! Regional mobile phone numbers.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Local `03XXXXXXXXX` (11 digits) or international `+923XXXXXXXXX`.
static MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(03[0-9]{9}|\+923[0-9]{9})$").expect("mobile pattern is a valid regex")
});

/// A validated Pakistani mobile number, stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validates a phone number. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if MOBILE_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidPhone(raw.to_string()))
        }
    }

    /// Returns the number as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number in international form without the leading `+`
    /// (`923001234567`), as used by WhatsApp links.
    pub fn international_digits(&self) -> String {
        match self.0.strip_prefix('+') {
            Some(digits) => digits.to_string(),
            None => format!("92{}", &self.0[1..]),
        }
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_eleven_digit_numbers() {
        assert!(PhoneNumber::parse("03001234567").is_ok());
        assert!(PhoneNumber::parse("03219876543").is_ok());
        assert!(PhoneNumber::parse(" 03001234567 ").is_ok());
    }

    #[test]
    fn accepts_international_numbers() {
        let phone = PhoneNumber::parse("+923001234567").unwrap();
        assert_eq!(phone.as_str(), "+923001234567");
    }

    #[test]
    fn rejects_ten_digit_numbers() {
        assert_eq!(
            PhoneNumber::parse("0300123456"),
            Err(ValidationError::InvalidPhone("0300123456".to_string()))
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "",
            "030012345678",
            "04001234567",
            "0300-1234567",
            "923001234567",
            "+92300123456",
            "+924001234567",
            "03001234abc",
        ] {
            assert!(PhoneNumber::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn international_digits() {
        assert_eq!(
            PhoneNumber::parse("03001234567")
                .unwrap()
                .international_digits(),
            "923001234567"
        );
        assert_eq!(
            PhoneNumber::parse("+923001234567")
                .unwrap()
                .international_digits(),
            "923001234567"
        );
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<PhoneNumber, _> = serde_json::from_str("\"03001234567\"");
        assert!(ok.is_ok());
        let bad: Result<PhoneNumber, _> = serde_json::from_str("\"12345\"");
        assert!(bad.is_err());
    }
}
