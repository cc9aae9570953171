//! Email address value object
//!
//! Checks run in a fixed order and the first failure decides the error:
//! overall length, then the length of the segment after a single `@`, then
//! the address grammar. The accepted string is stored untouched, with no
//! case folding or trimming.
//!
//! Both length limits count UTF-16 code units, so a character outside the
//! Basic Multilingual Plane counts twice.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

const MAX_LENGTH: usize = 80;
const MAX_SEGMENT_LENGTH: usize = 64;

static ADDRESS_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("address grammar is a valid pattern")
});

/// A validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates `raw` and wraps it
    ///
    /// # Errors
    ///
    /// - `EmailTooLong` above 80 UTF-16 code units
    /// - `EmailSegmentTooLong` when there is exactly one `@` and what follows
    ///   it exceeds 64 UTF-16 code units
    /// - `InvalidEmail` when empty or not matching the grammar
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();

        if utf16_len(&raw) > MAX_LENGTH {
            return Err(ValidationError::EmailTooLong);
        }

        let parts: Vec<&str> = raw.split('@').collect();
        if let [_, after_at] = parts.as_slice() {
            if utf16_len(after_at) > MAX_SEGMENT_LENGTH {
                return Err(ValidationError::EmailSegmentTooLong);
            }
        }

        if raw.is_empty() || !ADDRESS_GRAMMAR.is_match(&raw) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self(raw))
    }

    /// The address exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_compiles() {
        assert!(ADDRESS_GRAMMAR.is_match("a@b"));
    }

    #[test]
    fn test_grammar_accepts_special_local_characters() {
        assert!(ADDRESS_GRAMMAR.is_match("o'neil+tag{x}|y~z@mail.example.com"));
    }

    #[test]
    fn test_lengths_count_utf16_units() {
        assert_eq!(utf16_len("joao"), 4);
        assert_eq!(utf16_len("ç"), 1);
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn test_grammar_rejects_empty_label() {
        assert!(!ADDRESS_GRAMMAR.is_match("joao@email..com"));
        assert!(!ADDRESS_GRAMMAR.is_match("joao@.com"));
    }
}
