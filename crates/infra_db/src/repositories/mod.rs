//! Repository implementations
//!
//! Repositories own the SQL for an aggregate and map to and from plain row
//! types. Queries are checked at runtime (`sqlx::query_as` with `FromRow`)
//! so the crate builds without a live database.

pub mod customer;

pub use customer::{CustomerRepository, CustomerRow, CustomerValues};
