//! Customer Identity Domain
//!
//! This crate owns customer identity: who a customer is and how they are
//! found again.
//!
//! # Keys
//!
//! A customer can be resolved by any of:
//!
//! - **Id**: the numeric id assigned by the store
//! - **Tax id**: the national individual tax id (CPF), also the natural key
//!   saves are reconciled on
//! - **Email**: the contact address
//! - **Token**: a bearer token whose `sub` claim is the identity-provider
//!   subject id linked to the customer
//!
//! # Examples
//!
//! ```rust
//! use domain_customer::{Customer, EmailAddress, TaxId, ValidationError};
//!
//! let tax_id = TaxId::parse("123.456.789-09").unwrap();
//! assert_eq!(tax_id.digits(), "12345678909");
//!
//! let email = EmailAddress::parse("joao@email.com").unwrap();
//! let customer = Customer::new("João Silva", Some(email), Some(tax_id), None);
//! assert!(!customer.is_persisted());
//!
//! assert_eq!(TaxId::parse("111.111.111-11"), Err(ValidationError::InvalidTaxId));
//! ```

pub mod customer;
pub mod email;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod registration;
pub mod tax_id;
pub mod token;

pub use customer::Customer;
pub use email::EmailAddress;
pub use error::{CustomerError, ValidationError};
pub use gateway::IdentityGateway;
pub use ports::CustomerPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockCustomerPort;
pub use registration::RegisterCustomer;
pub use tax_id::TaxId;
pub use token::{TokenError, TokenResolver, TokenVerification};
