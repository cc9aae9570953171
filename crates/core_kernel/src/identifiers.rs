//! Strongly-typed identifiers for domain entities
//!
//! Records are keyed by store-assigned sequence numbers. Wrapping the raw
//! `i64` in a newtype keeps it from being mixed up with other integers, and
//! gives the "not yet persisted" value a name instead of a bare zero.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_numeric_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Identifier carried by a record the store has not assigned yet
            pub const UNASSIGNED: Self = Self(0);

            /// Wraps a store-assigned value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns true once the store has assigned this identifier
            pub const fn is_assigned(&self) -> bool {
                self.0 != 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::UNASSIGNED
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(CustomerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_is_zero() {
        assert_eq!(CustomerId::UNASSIGNED.value(), 0);
        assert!(!CustomerId::default().is_assigned());
    }

    #[test]
    fn test_display_is_plain_number() {
        assert_eq!(CustomerId::new(99).to_string(), "99");
    }
}
