//! Infrastructure Database Layer
//!
//! PostgreSQL storage for customer records, accessed through SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `CustomerRepository` owns the
//! SQL and speaks in row types, `PostgresCustomerAdapter` implements the
//! domain's `CustomerPort` on top of it and maps rows back to validated
//! domain values.
//!
//! # Schema
//!
//! The `cliente` table is expected to exist; no migrations ship with this
//! crate.
//!
//! ```sql
//! CREATE TABLE cliente (
//!     id        BIGSERIAL PRIMARY KEY,
//!     nome      VARCHAR(255) NOT NULL,
//!     idcognito VARCHAR(255),
//!     email     VARCHAR(80),
//!     cpf       VARCHAR(20) UNIQUE
//! );
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresCustomerAdapter};
//!
//! let pool = create_pool(&DatabaseConfig::new("postgres://localhost/customers")).await?;
//! let adapter = PostgresCustomerAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::PostgresCustomerAdapter;
pub use error::DatabaseError;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::CustomerRepository;
