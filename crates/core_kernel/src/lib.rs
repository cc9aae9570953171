//! Core Kernel - Foundational types for the customer identity service
//!
//! This crate provides the building blocks shared by the domain, storage and
//! HTTP layers:
//! - Store-assigned numeric identifiers
//! - Port infrastructure (errors, health checks) for swappable adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::CustomerId;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
