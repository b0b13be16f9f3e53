//! Todo lifecycle and planned-versus-actual time tracking.
//!
//! A todo moves through `todo`, `doing`, `pending` and `done`. Time spent in
//! `doing` accumulates locally and is persisted when the todo is paused or
//! completed. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
