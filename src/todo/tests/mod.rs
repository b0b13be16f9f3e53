//! Unit tests for the todo context.

mod memory_gateway_tests;
mod support;
