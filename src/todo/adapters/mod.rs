//! Adapter implementations for todo ports.

pub mod http;
pub mod memory;
