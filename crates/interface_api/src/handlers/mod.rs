//! Request handlers

pub mod customer;
pub mod health;
