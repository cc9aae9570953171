//! Domain Adapters
//!
//! Adapter implementations of domain ports backed by PostgreSQL. Each
//! adapter implements the port trait, translates between domain values and
//! row types, and delegates SQL to the repository layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerAdapter;
//! use domain_customer::CustomerPort;
//!
//! let adapter = PostgresCustomerAdapter::new(pool);
//! let customer = adapter.find_by_tax_id("123.456.789-09").await?;
//! ```

pub mod customer;

pub use customer::PostgresCustomerAdapter;
