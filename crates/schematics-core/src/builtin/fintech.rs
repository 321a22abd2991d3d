//! Financial format validators
//!
//! IBAN validation per ISO 13616: country-specific length check, then the
//! mod-97 checksum over the rearranged account number with letters expanded
//! to two digits. The remainder is computed incrementally digit by digit,
//! so no big-integer arithmetic is involved.

use anyhow::{bail, Result};
use serde_json::Value;

use crate::schema::Attributes;

/// Registered IBAN lengths per ISO 3166 country code.
const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AL", 28), ("AD", 24), ("AT", 20), ("AZ", 28), ("BH", 22), ("BE", 16),
    ("BA", 20), ("BR", 29), ("BG", 22), ("CR", 21), ("HR", 21), ("CY", 28),
    ("CZ", 24), ("DK", 18), ("DO", 28), ("EE", 20), ("FO", 18), ("FI", 18),
    ("FR", 27), ("GE", 22), ("DE", 22), ("GI", 23), ("GR", 27), ("GL", 18),
    ("GT", 28), ("HU", 28), ("IS", 26), ("IE", 22), ("IL", 23), ("IT", 27),
    ("JO", 30), ("KZ", 20), ("XK", 20), ("KW", 30), ("LV", 21), ("LB", 28),
    ("LI", 21), ("LT", 20), ("LU", 20), ("MT", 31), ("MR", 27), ("MU", 30),
    ("MC", 27), ("MD", 24), ("ME", 22), ("NL", 18), ("MK", 19), ("NO", 15),
    ("PK", 24), ("PS", 29), ("PL", 28), ("PT", 25), ("QA", 29), ("RO", 24),
    ("SM", 27), ("SA", 24), ("RS", 22), ("SK", 24), ("SI", 19), ("ES", 24),
    ("SE", 24), ("CH", 21), ("TN", 24), ("TR", 26), ("UA", 29), ("AE", 23),
    ("GB", 22), ("VG", 24),
];

pub(crate) fn valid_iban(iban: &str) -> bool {
    let iban = iban.to_ascii_uppercase();
    if iban.len() < 4 || !iban.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    let country = &iban[..2];
    let Some(&(_, expected_length)) = IBAN_LENGTHS.iter().find(|(code, _)| *code == country)
    else {
        return false;
    };
    if iban.len() != expected_length {
        return false;
    }

    // move the country code and check digits to the end, then mod 97
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let mut remainder: u32 = 0;
    for byte in rearranged.bytes() {
        if byte.is_ascii_digit() {
            remainder = (remainder * 10 + u32::from(byte - b'0')) % 97;
        } else {
            let number = u32::from(byte - b'A') + 10;
            remainder = (remainder * 10 + number / 10) % 97;
            remainder = (remainder * 10 + number % 10) % 97;
        }
    }
    remainder == 1
}

pub fn is_valid_iban(value: &Value, _attributes: &Attributes) -> Result<()> {
    let Some(iban) = value.as_str() else {
        bail!("value is not a string");
    };
    if valid_iban(iban) {
        Ok(())
    } else {
        bail!("invalid IBAN provided")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_valid_ibans() {
        assert!(valid_iban("GB82WEST12345698765432"));
        assert!(valid_iban("DE89370400440532013000"));
        assert!(valid_iban("gb82west12345698765432"));
    }

    #[test]
    fn test_rejects_bad_checksum_and_shape() {
        assert!(!valid_iban("GB82WEST12345698765433"));
        assert!(!valid_iban("GB82WEST1234569876543"));
        assert!(!valid_iban("ZZ82WEST12345698765432"));
        assert!(!valid_iban(""));
        assert!(!valid_iban("GB82 WEST 1234"));
    }

    #[test]
    fn test_validator_contract() {
        let attrs = Attributes::new();
        assert!(is_valid_iban(&json!("GB82WEST12345698765432"), &attrs).is_ok());
        let err = is_valid_iban(&json!("nope"), &attrs).unwrap_err();
        assert_eq!(err.to_string(), "invalid IBAN provided");
        assert!(is_valid_iban(&json!(42), &attrs).is_err());
    }
}
