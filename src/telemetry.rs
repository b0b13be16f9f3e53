//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive does not parse.
    #[error("invalid tracing directive '{directive}': {message}")]
    InvalidDirective {
        /// Rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },
}

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (for example `yojitsu_tracker=info`).
///
/// Returns `Ok(false)` when a global subscriber was already installed.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] when `RUST_LOG` is unset and
/// `default_directive` does not parse.
pub fn init_tracing(default_directive: &str) -> Result<bool, TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|err| TelemetryError::InvalidDirective {
            directive: default_directive.to_owned(),
            message: err.to_string(),
        })?;

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok())
}
