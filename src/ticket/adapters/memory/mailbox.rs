//! In-memory mail transport that records instead of sending.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::ticket::ports::{MailError, MailTransport, OutgoingEmail};

/// Mail transport that keeps delivered messages in memory.
///
/// A mailbox built with [`InMemoryMailbox::failing`] rejects every message,
/// which lets callers exercise delivery failure handling.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailbox {
    sent: Arc<RwLock<Vec<OutgoingEmail>>>,
    failure: Option<MailError>,
}

impl InMemoryMailbox {
    /// Creates an empty mailbox that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailbox that fails every delivery with `error`.
    #[must_use]
    pub fn failing(error: MailError) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(error),
        }
    }

    /// Returns the messages delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .read()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for InMemoryMailbox {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailError::Delivery(err.to_string()))?;
        sent.push(email.clone());
        Ok(())
    }
}
