//! Audit-trail entries describing changes made to a ticket.

use super::{ActivityLogId, Locale, TicketId, TicketPriority, TicketStatus, UserId, format_duration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A change worth recording in a ticket's activity trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TicketActivity {
    /// The status moved between two values.
    StatusChanged {
        /// Previous status.
        from: TicketStatus,
        /// New status.
        to: TicketStatus,
    },
    /// The assignee changed.
    AssigneeChanged {
        /// Previous assignee.
        from: Option<UserId>,
        /// New assignee.
        to: Option<UserId>,
    },
    /// The priority changed.
    PriorityChanged {
        /// Previous priority.
        from: TicketPriority,
        /// New priority.
        to: TicketPriority,
    },
    /// The accumulated support time was corrected by hand.
    TimeCorrected {
        /// Accumulated seconds before the correction.
        from: u64,
        /// Accumulated seconds after the correction.
        to: u64,
    },
}

impl TicketActivity {
    /// Renders the human-readable description in `locale`.
    #[must_use]
    pub fn describe(&self, locale: Locale) -> String {
        match (*self, locale) {
            (Self::StatusChanged { from, to }, Locale::En) => format!(
                "Status changed from \"{}\" to \"{}\"",
                locale.status_label(from),
                locale.status_label(to)
            ),
            (Self::StatusChanged { from, to }, Locale::PtBr) => format!(
                "Status alterado de \"{}\" para \"{}\"",
                locale.status_label(from),
                locale.status_label(to)
            ),
            (Self::AssigneeChanged { to: Some(user), .. }, Locale::En) => {
                format!("Ticket assigned to user {user}")
            }
            (Self::AssigneeChanged { to: Some(user), .. }, Locale::PtBr) => {
                format!("Chamado atribuído ao usuário {user}")
            }
            (Self::AssigneeChanged { to: None, .. }, Locale::En) => {
                "Ticket unassigned".to_owned()
            }
            (Self::AssigneeChanged { to: None, .. }, Locale::PtBr) => {
                "Chamado sem responsável".to_owned()
            }
            (Self::PriorityChanged { from, to }, Locale::En) => format!(
                "Priority changed from \"{}\" to \"{}\"",
                locale.priority_label(from),
                locale.priority_label(to)
            ),
            (Self::PriorityChanged { from, to }, Locale::PtBr) => format!(
                "Prioridade alterada de \"{}\" para \"{}\"",
                locale.priority_label(from),
                locale.priority_label(to)
            ),
            (Self::TimeCorrected { from, to }, Locale::En) => format!(
                "Time spent corrected from {} to {}",
                format_duration(from),
                format_duration(to)
            ),
            (Self::TimeCorrected { from, to }, Locale::PtBr) => format!(
                "Tempo gasto corrigido de {} para {}",
                format_duration(from),
                format_duration(to)
            ),
        }
    }
}

/// Persisted audit-trail entry for a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    id: ActivityLogId,
    ticket_id: TicketId,
    user_id: Option<UserId>,
    description: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActivityLogData {
    /// Persisted entry identifier.
    pub id: ActivityLogId,
    /// Ticket the entry describes.
    pub ticket_id: TicketId,
    /// User who made the change, if known.
    pub user_id: Option<UserId>,
    /// Rendered description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    /// Creates an entry with a pre-rendered description.
    #[must_use]
    pub fn new(
        ticket_id: TicketId,
        user_id: Option<UserId>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityLogId::new(),
            ticket_id,
            user_id,
            description: description.into(),
            created_at,
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityLogData) -> Self {
        Self {
            id: data.id,
            ticket_id: data.ticket_id,
            user_id: data.user_id,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityLogId {
        self.id
    }

    /// Returns the ticket the entry describes.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Returns the user who made the change, if known.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the rendered description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
