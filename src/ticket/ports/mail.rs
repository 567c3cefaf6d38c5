//! Outbound mail port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Sender mailbox, e.g. `"Support" <noreply@example.com>`.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Mail delivery contract.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the message cannot be handed off.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Errors returned by mail transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    /// The transport is missing credentials or settings.
    #[error("mail transport is not configured: {0}")]
    NotConfigured(String),

    /// The remote side refused or failed delivery.
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}
