//! Customer Domain Ports
//!
//! The `CustomerPort` trait is everything the identity gateway needs from
//! the record store. Adapters implement it:
//!
//! - **Internal Adapter**: PostgreSQL (`infra_db::adapters::PostgresCustomerAdapter`)
//! - **Mock Adapter**: in-memory, for tests (feature `mock`)
//!
//! Every method is one round trip to the store. Lookups are exact-match and
//! report a miss as `Ok(None)`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_customer::{CustomerPort, IdentityGateway, TokenResolver};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn CustomerPort> = Arc::new(PostgresCustomerAdapter::new(pool));
//! let gateway = IdentityGateway::new(port, TokenResolver::unverified());
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, PortError};

use crate::customer::Customer;

/// Storage port for customer records
#[async_trait]
pub trait CustomerPort: DomainPort + HealthCheckable {
    /// Finds the record whose stored tax id equals `tax_id` exactly
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Customer>, PortError>;

    /// Finds the record whose stored email equals `email` exactly
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, PortError>;

    /// Finds the record with the given id
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError>;

    /// Finds the record linked to an identity-provider subject id
    async fn find_by_auth_subject(&self, subject: &str) -> Result<Option<Customer>, PortError>;

    /// Inserts a new record and returns it with its assigned id
    ///
    /// A tax id already held by another record is a `PortError::Conflict`.
    async fn insert(&self, customer: &Customer) -> Result<Customer, PortError>;

    /// Overwrites record `id` with `customer`'s fields, but only while that
    /// record still carries `expected_tax_id`
    ///
    /// Returns `Ok(None)` when the guard fails: the record is gone or now
    /// holds a different tax id.
    async fn update_if_tax_id(
        &self,
        id: CustomerId,
        expected_tax_id: &str,
        customer: &Customer,
    ) -> Result<Option<Customer>, PortError>;
}

/// Mock implementation of CustomerPort for testing
///
/// Stores customers in memory and enforces the same tax-id uniqueness rule
/// as the database schema.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    struct Store {
        rows: BTreeMap<CustomerId, Customer>,
        last_id: i64,
    }

    /// In-memory mock implementation of CustomerPort
    #[derive(Debug, Default, Clone)]
    pub struct MockCustomerPort {
        store: Arc<RwLock<Store>>,
        unavailable: Arc<AtomicBool>,
    }

    impl MockCustomerPort {
        /// Creates a new empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with customers, assigning ids to unpersisted ones
        pub async fn with_customers(customers: Vec<Customer>) -> Self {
            let port = Self::new();
            {
                let mut store = port.store.write().await;
                for mut customer in customers {
                    if !customer.id.is_assigned() {
                        store.last_id += 1;
                        customer.id = CustomerId::new(store.last_id);
                    } else {
                        store.last_id = store.last_id.max(customer.id.value());
                    }
                    store.rows.insert(customer.id, customer);
                }
            }
            port
        }

        /// Makes every subsequent call fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of stored customers
        pub async fn len(&self) -> usize {
            self.store.read().await.rows.len()
        }

        /// Returns true when nothing is stored
        pub async fn is_empty(&self) -> bool {
            self.store.read().await.rows.is_empty()
        }

        /// Rewrites a stored record directly, bypassing every rule
        ///
        /// Lets tests simulate a concurrent writer.
        pub async fn overwrite(&self, customer: Customer) {
            self.store.write().await.rows.insert(customer.id, customer);
        }

        /// Deletes a stored record directly
        pub async fn remove(&self, id: CustomerId) -> Option<Customer> {
            self.store.write().await.rows.remove(&id)
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock store unavailable"));
            }
            Ok(())
        }

        async fn find_first<F>(&self, predicate: F) -> Result<Option<Customer>, PortError>
        where
            F: Fn(&Customer) -> bool + Send,
        {
            self.check_available()?;
            let store = self.store.read().await;
            Ok(store.rows.values().find(|c| predicate(*c)).cloned())
        }
    }

    impl DomainPort for MockCustomerPort {}

    #[async_trait]
    impl HealthCheckable for MockCustomerPort {
        async fn health_check(&self) -> HealthCheckResult {
            let unavailable = self.unavailable.load(Ordering::SeqCst);
            HealthCheckResult {
                adapter_id: "mock-customer-port".to_string(),
                status: if unavailable {
                    AdapterHealth::Unhealthy
                } else {
                    AdapterHealth::Healthy
                },
                latency_ms: 0,
                message: unavailable.then(|| "Mock adapter switched off".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CustomerPort for MockCustomerPort {
        async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Customer>, PortError> {
            self.find_first(|c| c.tax_id_str() == Some(tax_id)).await
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, PortError> {
            self.find_first(|c| c.email_str() == Some(email)).await
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError> {
            self.check_available()?;
            Ok(self.store.read().await.rows.get(&id).cloned())
        }

        async fn find_by_auth_subject(&self, subject: &str) -> Result<Option<Customer>, PortError> {
            self.find_first(|c| c.auth_subject.as_deref() == Some(subject)).await
        }

        async fn insert(&self, customer: &Customer) -> Result<Customer, PortError> {
            self.check_available()?;
            let mut store = self.store.write().await;

            if let Some(tax_id) = customer.tax_id_str() {
                if store.rows.values().any(|c| c.tax_id_str() == Some(tax_id)) {
                    return Err(PortError::conflict(format!(
                        "cpf '{}' already registered",
                        tax_id
                    )));
                }
            }

            store.last_id += 1;
            let mut saved = customer.clone();
            saved.id = CustomerId::new(store.last_id);
            store.rows.insert(saved.id, saved.clone());
            Ok(saved)
        }

        async fn update_if_tax_id(
            &self,
            id: CustomerId,
            expected_tax_id: &str,
            customer: &Customer,
        ) -> Result<Option<Customer>, PortError> {
            self.check_available()?;
            let mut store = self.store.write().await;

            let guard_holds = store
                .rows
                .get(&id)
                .is_some_and(|c| c.tax_id_str() == Some(expected_tax_id));
            if !guard_holds {
                return Ok(None);
            }

            if let Some(tax_id) = customer.tax_id_str() {
                if store.rows.values().any(|c| c.id != id && c.tax_id_str() == Some(tax_id)) {
                    return Err(PortError::conflict(format!(
                        "cpf '{}' already registered",
                        tax_id
                    )));
                }
            }

            let mut saved = customer.clone();
            saved.id = id;
            store.rows.insert(id, saved.clone());
            Ok(Some(saved))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockCustomerPort;
    use crate::{EmailAddress, TaxId};

    fn sample_customer() -> Customer {
        Customer::new(
            "João Silva",
            Some(EmailAddress::parse("joao@email.com").unwrap()),
            Some(TaxId::parse("93941938045").unwrap()),
            Some("cognito123".to_string()),
        )
    }

    #[tokio::test]
    async fn test_mock_port_insert_assigns_ids() {
        let port = MockCustomerPort::new();

        let first = port.insert(&sample_customer()).await.unwrap();
        let second = port
            .insert(&Customer::new("Ana", None, None, None))
            .await
            .unwrap();

        assert_eq!(first.id, CustomerId::new(1));
        assert_eq!(second.id, CustomerId::new(2));
        assert_eq!(port.len().await, 2);
    }

    #[tokio::test]
    async fn test_mock_port_lookups() {
        let port = MockCustomerPort::with_customers(vec![sample_customer()]).await;

        assert!(port.find_by_tax_id("93941938045").await.unwrap().is_some());
        assert!(port.find_by_email("joao@email.com").await.unwrap().is_some());
        assert!(port.find_by_auth_subject("cognito123").await.unwrap().is_some());
        assert!(port.find_by_id(CustomerId::new(1)).await.unwrap().is_some());

        assert!(port.find_by_tax_id("939.419.380-45").await.unwrap().is_none());
        assert!(port.find_by_email("JOAO@email.com").await.unwrap().is_none());
        assert!(port.find_by_id(CustomerId::new(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_port_rejects_duplicate_tax_id() {
        let port = MockCustomerPort::new();
        port.insert(&sample_customer()).await.unwrap();

        let err = port.insert(&sample_customer()).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_mock_port_guarded_update() {
        let port = MockCustomerPort::with_customers(vec![sample_customer()]).await;
        let mut changed = sample_customer();
        changed.name = "Changed".to_string();

        let stale = port
            .update_if_tax_id(CustomerId::new(1), "00000000000", &changed)
            .await
            .unwrap();
        assert!(stale.is_none());

        let updated = port
            .update_if_tax_id(CustomerId::new(1), "93941938045", &changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, CustomerId::new(1));
        assert_eq!(updated.name, "Changed");
    }

    #[tokio::test]
    async fn test_mock_port_unavailable() {
        let port = MockCustomerPort::new();
        port.set_unavailable(true);

        let err = port.find_by_email("joao@email.com").await.unwrap_err();
        assert!(err.is_transient());

        let health = port.health_check().await;
        assert_eq!(health.status, core_kernel::AdapterHealth::Unhealthy);
    }
}
