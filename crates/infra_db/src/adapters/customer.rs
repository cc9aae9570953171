//! PostgreSQL Customer Adapter
//!
//! Implements `CustomerPort` on top of `CustomerRepository`.
//!
//! Stored tax ids and emails are re-validated when rows are mapped back to
//! domain values. A row that fails validation is reported as
//! `PortError::Transformation` rather than handed to the domain unchecked.
//! Empty strings in optional columns are read as absent.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_customer::{Customer, CustomerPort, EmailAddress, TaxId};

use crate::repositories::customer::{CustomerRepository, CustomerRow, CustomerValues};

const ADAPTER_ID: &str = "postgres-customer-adapter";

/// PostgreSQL-backed implementation of the CustomerPort trait
///
/// # Error Handling
///
/// - unique violation on `cpf` -> `PortError::Conflict`
/// - pool or connection failures -> `PortError::Connection`
/// - undecodable or invalid stored values -> `PortError::Transformation`
/// - anything else -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresCustomerAdapter {
    repository: CustomerRepository,
}

impl PostgresCustomerAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresCustomerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCustomerAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl CustomerPort for PostgresCustomerAdapter {
    #[instrument(skip(self))]
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by cpf");
        let row = self.repository.find_by_cpf(tax_id).await?;
        row.map(row_to_customer).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by email");
        let row = self.repository.find_by_email(email).await?;
        row.map(row_to_customer).transpose()
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by id");
        let row = self.repository.find_by_id(id.value()).await?;
        row.map(row_to_customer).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_auth_subject(&self, subject: &str) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by subject id");
        let row = self.repository.find_by_idcognito(subject).await?;
        row.map(row_to_customer).transpose()
    }

    #[instrument(skip(self, customer))]
    async fn insert(&self, customer: &Customer) -> Result<Customer, PortError> {
        let row = self.repository.insert(&customer_to_values(customer)).await?;
        row_to_customer(row)
    }

    #[instrument(skip(self, expected_tax_id, customer), fields(customer_id = %id))]
    async fn update_if_tax_id(
        &self,
        id: CustomerId,
        expected_tax_id: &str,
        customer: &Customer,
    ) -> Result<Option<Customer>, PortError> {
        let row = self
            .repository
            .update_where_cpf(id.value(), expected_tax_id, &customer_to_values(customer))
            .await?;
        row.map(row_to_customer).transpose()
    }
}

/// Converts a database row to a domain Customer
fn row_to_customer(row: CustomerRow) -> Result<Customer, PortError> {
    let tax_id = present(row.cpf)
        .map(TaxId::parse)
        .transpose()
        .map_err(|e| PortError::transformation("cpf", e))?;
    let email = present(row.email)
        .map(EmailAddress::parse)
        .transpose()
        .map_err(|e| PortError::transformation("email", e))?;

    Ok(Customer {
        id: CustomerId::new(row.id),
        name: row.nome,
        tax_id,
        email,
        auth_subject: present(row.idcognito),
    })
}

fn customer_to_values(customer: &Customer) -> CustomerValues {
    CustomerValues {
        nome: customer.name.clone(),
        idcognito: customer.auth_subject.clone(),
        email: customer.email_str().map(str::to_owned),
        cpf: customer.tax_id_str().map(str::to_owned),
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
