//! Repository port for ticket persistence and atomic transition commits.

use crate::ticket::domain::{ClientId, EditedTicket, Ticket, TicketId, TimeLog};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ticket repository operations.
pub type TicketRepositoryResult<T> = Result<T, TicketRepositoryError>;

/// Ticket write that must land as a single unit.
///
/// The ticket fields and the optional time log are stored together, and only
/// if the stored ticket is still at `expected_revision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCommit {
    /// Ticket state to write.
    pub ticket: Ticket,
    /// Revision the change was computed from.
    pub expected_revision: u64,
    /// Time log row to append in the same transaction.
    pub time_log: Option<TimeLog>,
}

impl From<&EditedTicket> for TicketCommit {
    fn from(edit: &EditedTicket) -> Self {
        Self {
            ticket: edit.ticket.clone(),
            expected_revision: edit.expected_revision,
            time_log: edit.time_log.clone(),
        }
    }
}

/// Ticket persistence contract.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Stores a newly submitted ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TicketRepositoryError::DuplicateTicket`] when the identifier
    /// already exists.
    async fn store(&self, ticket: &Ticket) -> TicketRepositoryResult<()>;

    /// Finds a ticket by identifier.
    ///
    /// Returns `None` when the ticket does not exist.
    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>>;

    /// Returns the tickets submitted by a client, most recently updated first.
    async fn find_by_client(&self, client_id: ClientId) -> TicketRepositoryResult<Vec<Ticket>>;

    /// Writes a ticket change and its time log atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TicketRepositoryError::NotFound`] when the ticket does not
    /// exist and [`TicketRepositoryError::RevisionConflict`] when another
    /// writer committed first. Nothing is written in either case.
    async fn commit(&self, commit: &TicketCommit) -> TicketRepositoryResult<()>;
}

/// Errors returned by ticket and time log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TicketRepositoryError {
    /// A ticket with the same identifier already exists.
    #[error("duplicate ticket identifier: {0}")]
    DuplicateTicket(TicketId),

    /// The ticket was not found.
    #[error("ticket not found: {0}")]
    NotFound(TicketId),

    /// The stored ticket moved past the revision the change was based on.
    #[error("ticket {ticket_id} changed concurrently (expected revision {expected}, found {actual})")]
    RevisionConflict {
        /// Ticket being written.
        ticket_id: TicketId,
        /// Revision the writer read.
        expected: u64,
        /// Revision currently stored.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TicketRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns whether retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RevisionConflict { .. } | Self::Persistence(_))
    }
}
