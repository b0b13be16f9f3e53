//! User session: login through an identity provider and the resulting
//! access token.
//!
//! The todo context only needs to know whether a token is held; the HTTP
//! gateway is built with the session's token.

mod adapters;
mod domain;
mod ports;
mod service;

pub use adapters::StaticIdentityProvider;
pub use domain::{AccessToken, IdentityError};
pub use ports::IdentityProvider;
pub use service::SessionService;

#[cfg(test)]
mod tests;
