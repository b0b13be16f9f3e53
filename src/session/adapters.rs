//! In-memory identity provider.

use super::domain::{AccessToken, IdentityError};
use super::ports::IdentityProvider;
use async_trait::async_trait;

/// Provider answering every login with a fixed outcome.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    outcome: Result<AccessToken, IdentityError>,
}

impl StaticIdentityProvider {
    /// Provider that always grants `token`.
    #[must_use]
    pub const fn granting(token: AccessToken) -> Self {
        Self { outcome: Ok(token) }
    }

    /// Provider that always denies the login with `reason`.
    #[must_use]
    pub fn denying(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(IdentityError::Denied(reason.into())),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn login(&self) -> Result<AccessToken, IdentityError> {
        self.outcome.clone()
    }
}
