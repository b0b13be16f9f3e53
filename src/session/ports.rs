//! Identity provider port.

use super::domain::{AccessToken, IdentityError};
use async_trait::async_trait;

/// Third-party login flow yielding an access token.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the login flow.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the login is denied or the provider is
    /// unreachable.
    async fn login(&self) -> Result<AccessToken, IdentityError>;
}
