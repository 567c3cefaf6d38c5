//! In-memory activity trail.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::ticket::{
    domain::{ActivityLog, TicketId},
    ports::{ActivityLogError, ActivityLogRepository, ActivityLogResult},
};

/// Thread-safe in-memory activity log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLogRepository {
    entries: Arc<RwLock<Vec<ActivityLog>>>,
}

impl InMemoryActivityLogRepository {
    /// Creates an empty activity log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ActivityLogError {
    ActivityLogError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLogRepository {
    async fn append(&self, entry: &ActivityLog) -> ActivityLogResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(ActivityLogError::DuplicateEntry(entry.id()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn list_for_ticket(&self, ticket_id: TicketId) -> ActivityLogResult<Vec<ActivityLog>> {
        let entries = self.entries.read().map_err(lock_error)?;
        let mut found: Vec<ActivityLog> = entries
            .iter()
            .filter(|entry| entry.ticket_id() == ticket_id)
            .cloned()
            .collect();
        found.sort_by_key(ActivityLog::created_at);
        Ok(found)
    }
}
