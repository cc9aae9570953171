//! Customer registration command
//!
//! Carries raw caller input for a new customer. Optional fields that arrive
//! as empty strings are treated as absent; present values go through the
//! value-object validation before any customer is built.

use serde::Deserialize;

use crate::customer::Customer;
use crate::email::EmailAddress;
use crate::error::ValidationError;
use crate::tax_id::TaxId;

/// Raw input for registering (or re-registering) a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterCustomer {
    pub name: String,
    pub auth_subject: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl RegisterCustomer {
    /// Validates the command and builds an unpersisted customer
    ///
    /// # Errors
    ///
    /// `MissingField` for an empty name or subject id, otherwise whatever
    /// `EmailAddress::parse` / `TaxId::parse` report.
    pub fn into_customer(self) -> Result<Customer, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.auth_subject.trim().is_empty() {
            return Err(ValidationError::MissingField("auth_subject"));
        }

        let email = non_empty(self.email).map(EmailAddress::parse).transpose()?;
        let tax_id = non_empty(self.tax_id).map(TaxId::parse).transpose()?;

        Ok(Customer::new(self.name, email, tax_id, Some(self.auth_subject)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
