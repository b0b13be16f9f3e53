//! Port contracts for todo persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.

pub mod gateway;

pub use gateway::{TodoGateway, TodoGatewayError, TodoGatewayResult};
