//! Customer entity
//!
//! A customer is identified by a store-assigned numeric id and can also be
//! reached through three alternate keys: tax id, email, and the subject id
//! issued by the external identity provider. Tax id and email are optional,
//! but when present they have already passed validation.

use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;

use crate::email::EmailAddress;
use crate::tax_id::TaxId;

/// The customer aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned id; `CustomerId::UNASSIGNED` until persisted
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// National tax id, the natural key used to reconcile saves
    pub tax_id: Option<TaxId>,
    /// Contact email
    pub email: Option<EmailAddress>,
    /// Subject id issued by the external identity provider
    pub auth_subject: Option<String>,
}

impl Customer {
    /// Creates a customer that has not been persisted yet
    pub fn new(
        name: impl Into<String>,
        email: Option<EmailAddress>,
        tax_id: Option<TaxId>,
        auth_subject: Option<String>,
    ) -> Self {
        Self {
            id: CustomerId::UNASSIGNED,
            name: name.into(),
            tax_id,
            email,
            auth_subject,
        }
    }

    /// The zero-valued customer rendered when a lookup matches nothing
    ///
    /// Lookups return `Option<Customer>`; this value only exists so response
    /// shapes stay uniform at the HTTP boundary.
    pub fn empty() -> Self {
        Self::new(String::new(), None, None, None)
    }

    /// Returns true for the zero-valued customer produced by [`Customer::empty`]
    pub fn is_empty(&self) -> bool {
        !self.id.is_assigned()
            && self.name.is_empty()
            && self.tax_id.is_none()
            && self.email.is_none()
            && self.auth_subject.is_none()
    }

    /// Returns true once the store has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id.is_assigned()
    }

    /// Overwrites every mutable field of `existing` with the values carried
    /// by `self`, keeping only the existing id
    ///
    /// Absent incoming values clear the stored ones.
    pub fn reconcile_onto(self, existing: &Customer) -> Customer {
        Customer {
            id: existing.id,
            ..self
        }
    }

    pub fn tax_id_str(&self) -> Option<&str> {
        self.tax_id.as_ref().map(TaxId::as_str)
    }

    pub fn email_str(&self) -> Option<&str> {
        self.email.as_ref().map(EmailAddress::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_is_unpersisted() {
        let customer = Customer::new("Maria", None, None, Some("sub-1".to_string()));
        assert!(!customer.is_persisted());
        assert!(!customer.is_empty());
    }

    #[test]
    fn test_reconcile_keeps_existing_id_only() {
        let mut existing = Customer::new(
            "Old Name",
            Some(EmailAddress::parse("old@email.com").unwrap()),
            Some(TaxId::parse("93941938045").unwrap()),
            Some("old-sub".to_string()),
        );
        existing.id = CustomerId::new(12);

        let incoming = Customer::new(
            "New Name",
            None,
            Some(TaxId::parse("939.419.380-45").unwrap()),
            Some("new-sub".to_string()),
        );

        let merged = incoming.reconcile_onto(&existing);
        assert_eq!(merged.id, CustomerId::new(12));
        assert_eq!(merged.name, "New Name");
        assert_eq!(merged.email, None);
        assert_eq!(merged.tax_id_str(), Some("939.419.380-45"));
        assert_eq!(merged.auth_subject.as_deref(), Some("new-sub"));
    }
}
