//! Ticket aggregate root and its validated text fields.

use super::{ClientId, ProjectId, TicketDomainError, TicketId, TicketPriority, TicketStatus, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted ticket title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Non-empty, trimmed ticket title of at most [`MAX_TITLE_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketTitle(String);

impl TicketTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyTitle`] when the value is blank and
    /// [`TicketDomainError::TitleTooLong`] when it exceeds
    /// [`MAX_TITLE_LENGTH`] characters after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TicketDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicketDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TicketDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty, trimmed ticket description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketDescription(String);

impl TicketDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyDescription`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TicketDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicketDomainError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client-provided content of a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Submitting client.
    pub client_id: ClientId,
    /// Project the client belongs to.
    pub project_id: ProjectId,
    /// Ticket title.
    pub title: TicketTitle,
    /// Ticket description.
    pub description: TicketDescription,
    /// Requested priority.
    pub priority: TicketPriority,
}

/// Support ticket aggregate root.
///
/// `in_progress_started_at` is set exactly while the status is
/// [`TicketStatus::InProgress`] and the current interval has not been folded
/// into `time_spent_seconds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    client_id: ClientId,
    project_id: ProjectId,
    assignee: Option<UserId>,
    title: TicketTitle,
    description: TicketDescription,
    status: TicketStatus,
    priority: TicketPriority,
    time_spent_seconds: u64,
    in_progress_started_at: Option<DateTime<Utc>>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted ticket aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTicketData {
    /// Persisted ticket identifier.
    pub id: TicketId,
    /// Persisted submitting client.
    pub client_id: ClientId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted title.
    pub title: TicketTitle,
    /// Persisted description.
    pub description: TicketDescription,
    /// Persisted status.
    pub status: TicketStatus,
    /// Persisted priority.
    pub priority: TicketPriority,
    /// Persisted accumulated support time.
    pub time_spent_seconds: u64,
    /// Persisted timer start, if running.
    pub in_progress_started_at: Option<DateTime<Utc>>,
    /// Persisted optimistic-concurrency revision.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates a freshly submitted ticket in [`TicketStatus::Open`].
    #[must_use]
    pub fn submit(new_ticket: NewTicket, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TicketId::new(),
            client_id: new_ticket.client_id,
            project_id: new_ticket.project_id,
            assignee: None,
            title: new_ticket.title,
            description: new_ticket.description,
            status: TicketStatus::Open,
            priority: new_ticket.priority,
            time_spent_seconds: 0,
            in_progress_started_at: None,
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a ticket from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InconsistentTimer`] when the stored timer
    /// disagrees with the stored status.
    pub fn from_persisted(data: PersistedTicketData) -> Result<Self, TicketDomainError> {
        let timer_running = data.in_progress_started_at.is_some();
        if timer_running != data.status.is_timed() {
            return Err(TicketDomainError::InconsistentTimer {
                ticket_id: data.id,
                status: data.status,
                timer_running,
            });
        }

        Ok(Self {
            id: data.id,
            client_id: data.client_id,
            project_id: data.project_id,
            assignee: data.assignee,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            time_spent_seconds: data.time_spent_seconds,
            in_progress_started_at: data.in_progress_started_at,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Returns the submitting client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the project the ticket is billed against.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned support user, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TicketTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TicketDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TicketPriority {
        self.priority
    }

    /// Returns the support time already folded into the ticket.
    #[must_use]
    pub const fn time_spent_seconds(&self) -> u64 {
        self.time_spent_seconds
    }

    /// Returns when the running in-progress interval started, if any.
    #[must_use]
    pub const fn in_progress_started_at(&self) -> Option<DateTime<Utc>> {
        self.in_progress_started_at
    }

    /// Returns the optimistic-concurrency revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(super) fn set_assignee(&mut self, assignee: Option<UserId>) {
        self.assignee = assignee;
    }

    pub(super) fn set_priority(&mut self, priority: TicketPriority) {
        self.priority = priority;
    }

    pub(super) fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }

    pub(super) fn set_time_spent(&mut self, seconds: u64) {
        self.time_spent_seconds = seconds;
    }

    pub(super) fn start_timer(&mut self, now: DateTime<Utc>) {
        self.in_progress_started_at = Some(now);
    }

    /// Folds a stopped interval into the accumulator and clears the timer.
    pub(super) fn stop_timer(&mut self, seconds: u64) -> Result<(), TicketDomainError> {
        self.time_spent_seconds = self
            .time_spent_seconds
            .checked_add(seconds)
            .ok_or(TicketDomainError::TimeAccumulatorOverflow(self.id))?;
        self.in_progress_started_at = None;
        Ok(())
    }

    pub(super) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub(super) fn advance_revision(&mut self) -> Result<(), TicketDomainError> {
        self.revision = self
            .revision
            .checked_add(1)
            .ok_or(TicketDomainError::RevisionOverflow(self.id))?;
        Ok(())
    }
}
