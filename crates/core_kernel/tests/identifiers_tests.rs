//! Unit tests for the Identifiers module
//!
//! Tests cover creation, ordering, serialization and display formatting of
//! store-assigned identifiers.

use core_kernel::CustomerId;
use proptest::prelude::*;

mod customer_id_tests {
    use super::*;

    #[test]
    fn test_new_wraps_value() {
        let id = CustomerId::new(15);
        assert_eq!(id.value(), 15);
        assert!(id.is_assigned());
    }

    #[test]
    fn test_unassigned_constant() {
        assert_eq!(CustomerId::UNASSIGNED, CustomerId::new(0));
        assert!(!CustomerId::UNASSIGNED.is_assigned());
    }

    #[test]
    fn test_default_is_unassigned() {
        assert_eq!(CustomerId::default(), CustomerId::UNASSIGNED);
    }

    #[test]
    fn test_display_is_plain_number() {
        assert_eq!(CustomerId::new(1234).to_string(), "1234");
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(CustomerId::new(1) < CustomerId::new(2));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&CustomerId::new(31)).unwrap();
        assert_eq!(json, "31");

        let back: CustomerId = serde_json::from_str("31").unwrap();
        assert_eq!(back, CustomerId::new(31));
    }

    #[test]
    fn test_serde_rejects_non_numbers() {
        assert!(serde_json::from_str::<CustomerId>("\"CUS-31\"").is_err());
    }
}

proptest! {
    #[test]
    fn display_matches_raw_value(value in any::<i64>()) {
        prop_assert_eq!(CustomerId::new(value).to_string(), value.to_string());
    }

    #[test]
    fn serde_preserves_value(value in any::<i64>()) {
        let json = serde_json::to_string(&CustomerId::new(value)).unwrap();
        let back: CustomerId = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, CustomerId::new(value));
    }

    #[test]
    fn only_zero_is_unassigned(value in any::<i64>()) {
        prop_assert_eq!(CustomerId::new(value).is_assigned(), value != 0);
    }
}
