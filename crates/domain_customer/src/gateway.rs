//! Identity Gateway
//!
//! Resolves customers by any of their keys and reconciles saves against the
//! record that already holds the same tax id.
//!
//! # Save reconciliation
//!
//! 1. Without a tax id the customer is inserted.
//! 2. Otherwise the record holding that tax id is looked up. None found:
//!    insert.
//! 3. Found: the incoming values overwrite every mutable field of the stored
//!    record, whose id is kept. The write is conditional on the record still
//!    holding the tax id that was read. If that no longer holds, a concurrent
//!    writer deleted or re-keyed the record in between, and the customer is
//!    inserted instead. Two concurrent first-time saves of one tax id are
//!    resolved by the store's unique constraint: the loser gets
//!    `PortError::Conflict`.
//!
//! # Lookups
//!
//! Lookups return `Ok(None)` for a miss. A bearer token that cannot be
//! decoded, or that has no subject, is also a miss rather than an error.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use core_kernel::{CustomerId, HealthCheckResult, HealthCheckable};

use crate::customer::Customer;
use crate::error::CustomerError;
use crate::ports::CustomerPort;
use crate::registration::RegisterCustomer;
use crate::token::TokenResolver;

/// Resolves and persists customers through a [`CustomerPort`]
#[derive(Clone)]
pub struct IdentityGateway {
    port: Arc<dyn CustomerPort>,
    tokens: TokenResolver,
}

impl IdentityGateway {
    pub fn new(port: Arc<dyn CustomerPort>, tokens: TokenResolver) -> Self {
        Self { port, tokens }
    }

    /// Persists `customer`, merging into the record that shares its tax id
    ///
    /// Returns the stored customer with its (possibly new) id. Store failures,
    /// including uniqueness conflicts, propagate unchanged.
    #[instrument(skip(self, customer), fields(has_tax_id = customer.tax_id.is_some()))]
    pub async fn save(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let Some(tax_id) = customer.tax_id_str().map(str::to_owned) else {
            return self.insert(customer).await;
        };

        let Some(existing) = self.port.find_by_tax_id(&tax_id).await? else {
            return self.insert(customer).await;
        };

        let merged = customer.reconcile_onto(&existing);
        match self.port.update_if_tax_id(existing.id, &tax_id, &merged).await? {
            Some(saved) => {
                debug!(customer_id = %saved.id, "Reconciled customer with existing record");
                Ok(saved)
            }
            None => {
                warn!(
                    customer_id = %existing.id,
                    "Record changed between lookup and update, inserting instead"
                );
                let mut fresh = merged;
                fresh.id = CustomerId::UNASSIGNED;
                self.insert(fresh).await
            }
        }
    }

    /// Validates a registration command and saves the resulting customer
    pub async fn register(&self, command: RegisterCustomer) -> Result<Customer, CustomerError> {
        let customer = command.into_customer()?;
        self.save(customer).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Customer>, CustomerError> {
        Ok(self.port.find_by_tax_id(tax_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
        Ok(self.port.find_by_email(email).await?)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        Ok(self.port.find_by_id(id).await?)
    }

    /// Resolves the customer linked to the subject of a bearer token
    #[instrument(skip(self, authorization))]
    pub async fn find_by_token(&self, authorization: &str) -> Result<Option<Customer>, CustomerError> {
        let subject = match self.tokens.subject(authorization) {
            Ok(subject) => subject,
            Err(e) => {
                debug!(error = %e, "Token did not yield a subject");
                return Ok(None);
            }
        };

        Ok(self.port.find_by_auth_subject(&subject).await?)
    }

    /// Reports the health of the underlying store
    pub async fn health_check(&self) -> HealthCheckResult {
        self.port.health_check().await
    }

    async fn insert(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let saved = self.port.insert(&customer).await?;
        debug!(customer_id = %saved.id, "Inserted customer");
        Ok(saved)
    }
}
