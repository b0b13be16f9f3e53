//! Access token and identity errors.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Opaque bearer token issued by the identity provider.
///
/// The token value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyToken`] for a blank value.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let token = value.into();
        if token.trim().is_empty() {
            return Err(IdentityError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Errors returned while establishing a session.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider returned an empty token.
    #[error("identity provider returned an empty access token")]
    EmptyToken,

    /// The user cancelled or the provider refused the login.
    #[error("login denied: {0}")]
    Denied(String),

    /// The provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider failure.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
