//! National tax identifier (CPF)
//!
//! A CPF is eleven digits, the last two being modulo-11 check digits over
//! the preceding ones. It is usually written with punctuation, e.g.
//! `123.456.789-09`. Validation only looks at the digits; the string exactly
//! as given is what gets stored and displayed.
//!
//! # Examples
//!
//! ```rust
//! use domain_customer::TaxId;
//!
//! let tax_id = TaxId::parse("123.456.789-09").unwrap();
//! assert_eq!(tax_id.as_str(), "123.456.789-09");
//! assert_eq!(tax_id.digits(), "12345678909");
//!
//! assert!(TaxId::parse("123.456.789-00").is_err());
//! assert!(TaxId::parse("111.111.111-11").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

const DIGIT_COUNT: usize = 11;

/// A validated tax identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    /// Validates `raw` and wraps it
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidTaxId` when the input does not hold exactly
    /// eleven digits, when all digits are equal, or when either check digit
    /// does not match.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let digits = extract_digits(&raw).ok_or(ValidationError::InvalidTaxId)?;

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(ValidationError::InvalidTaxId);
        }

        let first = check_digit(&digits[..9]);
        let second = check_digit(&digits[..10]);
        if digits[9] != first || digits[10] != second {
            return Err(ValidationError::InvalidTaxId);
        }

        Ok(Self(raw))
    }

    /// The value as originally supplied, punctuation included
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The eleven digits without punctuation
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

/// Pulls the digits out of `raw`; `None` unless there are exactly eleven
fn extract_digits(raw: &str) -> Option<[u32; DIGIT_COUNT]> {
    let mut digits = [0u32; DIGIT_COUNT];
    let mut count = 0;

    for d in raw.chars().filter_map(|c| c.to_digit(10)) {
        if count == DIGIT_COUNT {
            return None;
        }
        digits[count] = d;
        count += 1;
    }

    (count == DIGIT_COUNT).then_some(digits)
}

/// Modulo-11 check digit over `digits`, weights descending to 2
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top_weight - i as u32))
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaxId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for TaxId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaxId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digits_of_known_value() {
        let digits = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 9];
        assert_eq!(check_digit(&digits[..9]), 0);
        assert_eq!(check_digit(&digits[..10]), 9);
    }

    #[test]
    fn test_check_digit_remainder_above_one() {
        // 9,3,9,4,1,9,3,8,0 -> sum 304, remainder 7
        assert_eq!(check_digit(&[9, 3, 9, 4, 1, 9, 3, 8, 0]), 4);
    }

    #[test]
    fn test_extract_digits_counts_exactly_eleven() {
        assert!(extract_digits("123.456.789-09").is_some());
        assert!(extract_digits("123.456.78").is_none());
        assert!(extract_digits("123.456.789.012").is_none());
        assert!(extract_digits("").is_none());
    }

    #[test]
    fn test_non_ascii_digits_are_not_counted() {
        // Arabic-Indic digits must not stand in for ASCII ones
        assert!(extract_digits("١٢٣٤٥٦٧٨٩٠٩").is_none());
    }
}
