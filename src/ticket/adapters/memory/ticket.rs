//! In-memory ticket and time log repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ticket::{
    domain::{ClientId, ProjectId, Ticket, TicketId, TimeLog, TimeWindow},
    ports::{
        TicketCommit, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
        TimeLogRepository,
    },
};

/// Thread-safe in-memory ticket repository.
///
/// Tickets and time logs share one lock, so a commit is observed either
/// completely or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketRepository {
    state: Arc<RwLock<InMemoryTicketState>>,
}

#[derive(Debug, Default)]
struct InMemoryTicketState {
    tickets: HashMap<TicketId, Ticket>,
    time_logs: Vec<TimeLog>,
}

impl InMemoryTicketRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TicketRepositoryError {
    TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn belongs_to_project(state: &InMemoryTicketState, log: &TimeLog, project_id: ProjectId) -> bool {
    state
        .tickets
        .get(&log.ticket_id())
        .is_some_and(|ticket| ticket.project_id() == project_id)
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn store(&self, ticket: &Ticket) -> TicketRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tickets.contains_key(&ticket.id()) {
            return Err(TicketRepositoryError::DuplicateTicket(ticket.id()));
        }
        state.tickets.insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tickets.get(&id).cloned())
    }

    async fn find_by_client(&self, client_id: ClientId) -> TicketRepositoryResult<Vec<Ticket>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tickets: Vec<Ticket> = state
            .tickets
            .values()
            .filter(|ticket| ticket.client_id() == client_id)
            .cloned()
            .collect();
        tickets.sort_by(|left, right| right.updated_at().cmp(&left.updated_at()));
        Ok(tickets)
    }

    async fn commit(&self, commit: &TicketCommit) -> TicketRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let ticket_id = commit.ticket.id();
        let stored_revision = state
            .tickets
            .get(&ticket_id)
            .map(Ticket::revision)
            .ok_or(TicketRepositoryError::NotFound(ticket_id))?;

        if stored_revision != commit.expected_revision {
            return Err(TicketRepositoryError::RevisionConflict {
                ticket_id,
                expected: commit.expected_revision,
                actual: stored_revision,
            });
        }

        if let Some(time_log) = &commit.time_log {
            state.time_logs.push(time_log.clone());
        }
        state.tickets.insert(ticket_id, commit.ticket.clone());
        Ok(())
    }
}

#[async_trait]
impl TimeLogRepository for InMemoryTicketRepository {
    async fn list_for_ticket(&self, ticket_id: TicketId) -> TicketRepositoryResult<Vec<TimeLog>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut logs: Vec<TimeLog> = state
            .time_logs
            .iter()
            .filter(|log| log.ticket_id() == ticket_id)
            .cloned()
            .collect();
        logs.sort_by_key(TimeLog::created_at);
        Ok(logs)
    }

    async fn total_seconds_for_project(
        &self,
        project_id: ProjectId,
        window: Option<TimeWindow>,
    ) -> TicketRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let total = state
            .time_logs
            .iter()
            .filter(|log| belongs_to_project(&state, log, project_id))
            .filter(|log| window.is_none_or(|range| range.contains(log.created_at())))
            .fold(0_u64, |sum, log| sum.saturating_add(log.seconds_spent()));
        Ok(total)
    }
}
