//! Session service tracking whether the user is authenticated.

use super::domain::{AccessToken, IdentityError};
use super::ports::IdentityProvider;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Holds the access token obtained from an [`IdentityProvider`].
#[derive(Debug)]
pub struct SessionService<P: IdentityProvider> {
    provider: Arc<P>,
    token: RwLock<Option<AccessToken>>,
}

impl<P: IdentityProvider> SessionService<P> {
    /// Creates an unauthenticated session.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            token: RwLock::new(None),
        }
    }

    /// Logs in and stores the issued token. A failed login leaves the session
    /// unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`IdentityError`].
    pub async fn login(&self) -> Result<AccessToken, IdentityError> {
        let outcome = self
            .provider
            .login()
            .await
            .inspect(|_| info!("session authenticated"))
            .inspect_err(|err| warn!(error = %err, "login failed"));
        self.replace(outcome.as_ref().ok().cloned());
        outcome
    }

    /// Returns whether a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Returns the held token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forgets the held token.
    pub fn logout(&self) {
        self.replace(None);
        info!("session closed");
    }

    fn replace(&self, token: Option<AccessToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
