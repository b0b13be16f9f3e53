//! 予実 Tracker: planned-versus-actual todo tracking.
//!
//! This crate provides the core of a personal task tracker. Todos carry an
//! estimated duration, and the time actually spent on them is accumulated
//! while they are being worked on, so the plan can be compared with reality
//! once they are done.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (REST client, in-memory)
//!
//! # Modules
//!
//! - [`todo`]: Todo lifecycle state machine, time accumulation and gateways
//! - [`session`]: Login through an identity provider
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber installation

pub mod config;
pub mod session;
pub mod telemetry;
pub mod todo;
