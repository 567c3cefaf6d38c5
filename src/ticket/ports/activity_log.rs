//! Repository port for the ticket activity trail.

use crate::ticket::domain::{ActivityLog, ActivityLogId, TicketId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Append-only activity trail.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Appends an entry.
    async fn append(&self, entry: &ActivityLog) -> ActivityLogResult<()>;

    /// Returns a ticket's entries, oldest first.
    async fn list_for_ticket(&self, ticket_id: TicketId) -> ActivityLogResult<Vec<ActivityLog>>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// An entry with the same identifier already exists.
    #[error("duplicate activity log entry: {0}")]
    DuplicateEntry(ActivityLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
