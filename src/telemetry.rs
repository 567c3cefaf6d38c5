//! Tracing subscriber setup for binaries and test harnesses embedding the
//! desk.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive could not be parsed.
    #[error("invalid tracing filter '{directive}': {source}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser error.
        source: tracing_subscriber::filter::ParseError,
    },
}

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_directive` (for example `"ticketdesk=info"`) when
/// `RUST_LOG` is unset or invalid. Returns `Ok(false)` when a global
/// subscriber was already installed, so repeated calls are harmless.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `default_directive` is
/// needed and cannot be parsed.
pub fn init_tracing(default_directive: &str) -> Result<bool, TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(default_directive).map_err(|source| TelemetryError::InvalidFilter {
            directive: default_directive.to_owned(),
            source,
        })
    })?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok())
}
