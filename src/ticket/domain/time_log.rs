//! Append-only record of one closed in-progress interval.

use super::{TicketId, TimeLogId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One contiguous `in_progress` interval that has been flushed.
///
/// Rows are created only when a ticket leaves `in_progress` and are never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLog {
    id: TimeLogId,
    ticket_id: TicketId,
    user_id: Option<UserId>,
    seconds_spent: u64,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted time log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTimeLogData {
    /// Persisted row identifier.
    pub id: TimeLogId,
    /// Ticket the interval belongs to.
    pub ticket_id: TicketId,
    /// User credited with the interval, if known.
    pub user_id: Option<UserId>,
    /// Interval length in seconds.
    pub seconds_spent: u64,
    /// Flush time.
    pub created_at: DateTime<Utc>,
}

impl TimeLog {
    /// Records a flushed interval.
    ///
    /// A missing `user_id` marks an attribution gap; the interval is still
    /// counted.
    #[must_use]
    pub fn record(
        ticket_id: TicketId,
        user_id: Option<UserId>,
        seconds_spent: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TimeLogId::new(),
            ticket_id,
            user_id,
            seconds_spent,
            created_at,
        }
    }

    /// Reconstructs a time log from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedTimeLogData) -> Self {
        Self {
            id: data.id,
            ticket_id: data.ticket_id,
            user_id: data.user_id,
            seconds_spent: data.seconds_spent,
            created_at: data.created_at,
        }
    }

    /// Returns the row identifier.
    #[must_use]
    pub const fn id(&self) -> TimeLogId {
        self.id
    }

    /// Returns the owning ticket.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Returns the credited user, if known.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the interval length in seconds.
    #[must_use]
    pub const fn seconds_spent(&self) -> u64 {
        self.seconds_spent
    }

    /// Returns the flush time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
