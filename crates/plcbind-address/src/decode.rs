//! Hand-written decoder for located-variable address literals.
//!
//! Two grammars are recognized, and a literal must match one of them in full:
//!
//! - bit form: `%` (`I`|`Q`|`M`) `X` MAJOR `.` MINOR, where MINOR is a single digit
//! - word form: `%` (`I`|`Q`|`M`) (`B`|`W`|`D`|`L`) MAJOR
//!
//! MAJOR is one or more ASCII digits. Range checks run only after the literal
//! matched a grammar, so `%IX0.9` is out of range while `%IX0.10` is malformed.

use crate::address::{Address, AddressLocation, AddressSize, MAX_BIT_MAJOR, MAX_BIT_MINOR, MAX_WORD_MAJOR};
use crate::error::DecodeError;

/// Decode an address literal into its structured form.
pub fn decode(literal: &str) -> Result<Address, DecodeError> {
    let malformed = || DecodeError::MalformedLiteral {
        literal: literal.to_string(),
    };

    let rest = literal.strip_prefix('%').ok_or_else(malformed)?;
    let mut chars = rest.chars();
    let location = chars
        .next()
        .and_then(AddressLocation::from_letter)
        .ok_or_else(malformed)?;
    let body = chars.as_str();

    if let Some(bit_body) = body.strip_prefix('X') {
        let (major, minor) = split_bit_body(bit_body).ok_or_else(malformed)?;
        let major = check_range(literal, "major", major, MAX_BIT_MAJOR)?;
        let minor = check_range(literal, "minor", minor, MAX_BIT_MINOR)?;
        return Address::bit(location, major, minor).ok_or_else(malformed);
    }

    let mut chars = body.chars();
    let size = chars
        .next()
        .and_then(AddressSize::from_word_letter)
        .ok_or_else(malformed)?;
    let major = parse_digits(chars.as_str()).ok_or_else(malformed)?;
    let major = check_range(literal, "major", major, MAX_WORD_MAJOR)?;
    Address::word(location, size, major).ok_or_else(malformed)
}

/// Split `MAJOR.MINOR` where MINOR is exactly one digit.
fn split_bit_body(body: &str) -> Option<(u64, u64)> {
    let (major, minor) = body.split_once('.')?;
    if minor.len() != 1 {
        return None;
    }
    Some((parse_digits(major)?, parse_digits(minor)?))
}

/// Parse a non-empty run of ASCII digits, saturating on overflow.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    }))
}

fn check_range(
    literal: &str,
    component: &'static str,
    value: u64,
    max: u32,
) -> Result<u32, DecodeError> {
    if value > u64::from(max) {
        return Err(DecodeError::OutOfRange {
            literal: literal.to_string(),
            component,
            value,
            max,
        });
    }
    // value <= max <= u32::MAX
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_malformed(literal: &str) -> bool {
        matches!(decode(literal), Err(DecodeError::MalformedLiteral { .. }))
    }

    fn is_out_of_range(literal: &str) -> bool {
        matches!(decode(literal), Err(DecodeError::OutOfRange { .. }))
    }

    #[test]
    fn decode_bit_form() {
        let addr = decode("%IX0.0").unwrap();
        assert_eq!(addr.location(), AddressLocation::Input);
        assert_eq!(addr.size(), AddressSize::Bit);
        assert_eq!(addr.major(), 0);
        assert_eq!(addr.minor(), Some(0));

        let addr = decode("%MX1023.7").unwrap();
        assert_eq!(addr.location(), AddressLocation::Memory);
        assert_eq!(addr.major(), 1023);
        assert_eq!(addr.minor(), Some(7));
    }

    #[test]
    fn decode_word_form() {
        let addr = decode("%QW3").unwrap();
        assert_eq!(addr.location(), AddressLocation::Output);
        assert_eq!(addr.size(), AddressSize::Word);
        assert_eq!(addr.major(), 3);
        assert_eq!(addr.minor(), None);

        assert_eq!(decode("%IB31").unwrap().size(), AddressSize::Byte);
        assert_eq!(decode("%MD0").unwrap().size(), AddressSize::DoubleWord);
        assert_eq!(decode("%QL7").unwrap().size(), AddressSize::LongWord);
    }

    #[test]
    fn every_valid_bit_literal_decodes() {
        for location in ['I', 'Q', 'M'] {
            for major in [0u32, 1, 9, 10, 512, 1023] {
                for minor in 0..=7u32 {
                    let literal = format!("%{location}X{major}.{minor}");
                    let addr = decode(&literal).unwrap();
                    assert_eq!(addr.major(), major);
                    assert_eq!(addr.minor(), Some(minor));
                }
            }
        }
    }

    #[test]
    fn out_of_range_components() {
        assert!(is_out_of_range("%IX1024.0"));
        assert!(is_out_of_range("%QX0.8"));
        assert!(is_out_of_range("%IX0.9"));
        assert!(is_out_of_range("%IW32"));
        assert!(is_out_of_range("%MB100"));
        assert!(is_out_of_range("%QL99999999999999999999999"));
    }

    #[test]
    fn out_of_range_reports_component() {
        let err = decode("%QX2.8").unwrap_err();
        assert_eq!(
            err,
            DecodeError::OutOfRange {
                literal: "%QX2.8".into(),
                component: "minor",
                value: 8,
                max: 7,
            }
        );
        assert!(err.to_string().contains("%QX2.8"));
    }

    #[test]
    fn malformed_literals() {
        assert!(is_malformed("%XY12"));
        assert!(is_malformed("IX0.0"));
        assert!(is_malformed(""));
        assert!(is_malformed("%"));
        assert!(is_malformed("%I"));
        assert!(is_malformed("%IX"));
        assert!(is_malformed("%IX0"));
        assert!(is_malformed("%IX0."));
        assert!(is_malformed("%IX.0"));
        assert!(is_malformed("%IX0.10"));
        assert!(is_malformed("%IW"));
        assert!(is_malformed("%IW3.1"));
        assert!(is_malformed("%IB0.0"));
        assert!(is_malformed("%ix0.0"));
        assert!(is_malformed(" %IX0.0"));
        assert!(is_malformed("%IX0.0 "));
        assert!(is_malformed("%IW-1"));
        assert!(is_malformed("%IW+1"));
        assert!(is_malformed("%ZW1"));
    }
}
