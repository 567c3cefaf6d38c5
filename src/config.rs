//! Runtime configuration for the support desk.
//!
//! Configuration is plain JSON. Every field has a default, so an empty object
//! is a valid configuration:
//!
//! ```json
//! {
//!   "admin_email": "support@example.com",
//!   "sender": "\"Support\" <noreply@example.com>",
//!   "locale": "pt-BR",
//!   "budget_period": "calendar_month",
//!   "max_commit_attempts": 3
//! }
//! ```

use crate::ticket::domain::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Span of time logs counted against a project's support-hour limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    /// Every time log ever recorded for the project.
    #[default]
    Lifetime,
    /// Only time logs flushed in the current UTC calendar month.
    CalendarMonth,
}

/// Support desk settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    /// Address that receives new-ticket notifications.
    pub admin_email: String,
    /// Sender mailbox for outgoing notifications.
    pub sender: String,
    /// Language of activity descriptions and emails.
    pub locale: Locale,
    /// Period counted against project support-hour limits.
    pub budget_period: BudgetPeriod,
    /// Attempts made to commit a ticket edit that keeps losing races.
    pub max_commit_attempts: u32,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@localhost".to_owned(),
            sender: "\"Support Desk\" <noreply@localhost>".to_owned(),
            locale: Locale::En,
            budget_period: BudgetPeriod::Lifetime,
            max_commit_attempts: 3,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The configuration text is not valid JSON for [`DeskConfig`].
    #[error("invalid configuration: {0}")]
    Parse(Arc<serde_json::Error>),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl DeskConfig {
    /// Parses and validates configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(Arc::new(err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`DeskConfig::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref).map_err(|err| ConfigError::Read {
            path: path_ref.to_path_buf(),
            source: Arc::new(err),
        })?;
        Self::from_json_str(&text)
    }

    /// Checks field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero attempt count or an
    /// admin address without `@`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_commit_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_commit_attempts",
                reason: "must be at least 1".to_owned(),
            });
        }
        if !self.admin_email.contains('@') {
            return Err(ConfigError::InvalidValue {
                field: "admin_email",
                reason: format!("'{}' is not an email address", self.admin_email),
            });
        }
        Ok(())
    }
}
