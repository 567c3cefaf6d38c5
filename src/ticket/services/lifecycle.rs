//! Service layer for ticket submission, edits and status transitions.

use crate::config::{BudgetPeriod, DeskConfig};
use crate::ticket::{
    domain::{
        ClientId, EditedTicket, NewTicket, Project, ProjectId, StatusChange, Ticket,
        TicketActivity, TicketDescription, TicketDomainError, TicketEdit, TicketId,
        TicketPriority, TicketStatus, TicketTitle, TimeLog, TimeWindow, TimerStop, UserId,
    },
    ports::{
        ProjectRepository, ProjectRepositoryError, TicketCommit, TicketRepository,
        TicketRepositoryError, TimeLogRepository,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for submitting a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicketRequest {
    client_id: ClientId,
    project_id: ProjectId,
    title: String,
    description: String,
    priority: TicketPriority,
}

impl SubmitTicketRequest {
    /// Creates a request with the required ticket fields and medium priority.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            project_id,
            title: title.into(),
            description: description.into(),
            priority: TicketPriority::default(),
        }
    }

    /// Sets the requested priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for editing an existing ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTicketRequest {
    ticket_id: TicketId,
    edit: TicketEdit,
    acting_user: Option<UserId>,
}

impl UpdateTicketRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub fn new(ticket_id: TicketId) -> Self {
        Self {
            ticket_id,
            edit: TicketEdit::new(),
            acting_user: None,
        }
    }

    /// Requests a status change.
    #[must_use]
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.edit = self.edit.with_status(status);
        self
    }

    /// Requests a priority change.
    #[must_use]
    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.edit = self.edit.with_priority(priority);
        self
    }

    /// Assigns the ticket to `user`.
    #[must_use]
    pub fn assign_to(mut self, user: UserId) -> Self {
        self.edit = self.edit.assign_to(user);
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub fn unassign(mut self) -> Self {
        self.edit = self.edit.unassign();
        self
    }

    /// Overwrites the accumulated support time.
    #[must_use]
    pub fn correct_time_spent(mut self, seconds: u64) -> Self {
        self.edit = self.edit.correct_time_spent(seconds);
        self
    }

    /// Records who is making the change.
    #[must_use]
    pub const fn by(mut self, user: UserId) -> Self {
        self.acting_user = Some(user);
        self
    }

    /// Returns the targeted ticket.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }
}

/// A freshly stored ticket together with the project it was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTicket {
    /// The stored ticket.
    pub ticket: Ticket,
    /// The project the ticket is billed against.
    pub project: Project,
}

/// Result of a ticket update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketUpdateOutcome {
    /// Ticket as stored after the update.
    pub ticket: Ticket,
    /// Changes committed, in application order. Empty for a no-op update.
    pub activities: Vec<TicketActivity>,
    /// Time log appended with the commit, if the timer stopped.
    pub time_log: Option<TimeLog>,
    /// Stopped interval details, if the timer stopped.
    pub timer_stop: Option<TimerStop>,
    /// User who made the change.
    pub acting_user: Option<UserId>,
}

impl TicketUpdateOutcome {
    fn unchanged(ticket: Ticket, acting_user: Option<UserId>) -> Self {
        Self {
            ticket,
            activities: Vec::new(),
            time_log: None,
            timer_stop: None,
            acting_user,
        }
    }

    fn committed(edited: EditedTicket, acting_user: Option<UserId>) -> Self {
        Self {
            ticket: edited.ticket,
            activities: edited.activities,
            time_log: edited.time_log,
            timer_stop: edited.timer_stop,
            acting_user,
        }
    }

    /// Returns whether anything was written.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.activities.is_empty()
    }

    /// Returns the status change made by the update, if any.
    #[must_use]
    pub fn status_change(&self) -> Option<StatusChange> {
        self.activities.iter().find_map(|activity| match *activity {
            TicketActivity::StatusChanged { from, to } => Some(StatusChange { from, to }),
            _ => None,
        })
    }
}

/// Service-level errors for ticket lifecycle operations.
#[derive(Debug, Error)]
pub enum TicketLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TicketDomainError),
    /// Ticket or time log repository operation failed.
    #[error(transparent)]
    Repository(#[from] TicketRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The referenced ticket does not exist.
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),
    /// The project's support-hour limit has been used up.
    #[error(
        "support hours exhausted for project {project_id}: {spent_seconds}s spent of {limit_seconds}s"
    )]
    SupportBudgetExhausted {
        /// Project whose limit was reached.
        project_id: ProjectId,
        /// Seconds already logged in the budget period.
        spent_seconds: u64,
        /// Configured limit in seconds.
        limit_seconds: u64,
    },
}

impl TicketLifecycleError {
    /// Returns whether retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Repository(err) => err.is_retryable(),
            Self::Project(ProjectRepositoryError::Persistence(_)) => true,
            _ => false,
        }
    }

    /// Returns whether the error is a business rule refusal.
    #[must_use]
    pub const fn is_policy_violation(&self) -> bool {
        matches!(self, Self::SupportBudgetExhausted { .. })
    }
}

/// Result type for ticket lifecycle service operations.
pub type TicketLifecycleResult<T> = Result<T, TicketLifecycleError>;

/// Tunables for [`TicketLifecycleService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    /// Period counted against project support-hour limits.
    pub budget_period: BudgetPeriod,
    /// Attempts made to commit an edit that keeps losing races. At least 1.
    pub max_commit_attempts: u32,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            budget_period: BudgetPeriod::Lifetime,
            max_commit_attempts: 3,
        }
    }
}

impl From<&DeskConfig> for LifecyclePolicy {
    fn from(config: &DeskConfig) -> Self {
        Self {
            budget_period: config.budget_period,
            max_commit_attempts: config.max_commit_attempts.max(1),
        }
    }
}

/// Ticket lifecycle orchestration service.
#[derive(Clone)]
pub struct TicketLifecycleService<R, P, C>
where
    R: TicketRepository + TimeLogRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tickets: Arc<R>,
    projects: Arc<P>,
    clock: Arc<C>,
    policy: LifecyclePolicy,
}

impl<R, P, C> TicketLifecycleService<R, P, C>
where
    R: TicketRepository + TimeLogRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default policy.
    #[must_use]
    pub fn new(tickets: Arc<R>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tickets,
            projects,
            clock,
            policy: LifecyclePolicy::default(),
        }
    }

    /// Replaces the service policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    /// Submits a new ticket in `open` status.
    ///
    /// Submission is refused once the project's support-hour limit has been
    /// reached for the configured budget period.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::Domain`] for blank text,
    /// [`TicketLifecycleError::ProjectNotFound`] for an unknown project,
    /// [`TicketLifecycleError::SupportBudgetExhausted`] when the limit is
    /// reached, and repository errors otherwise.
    pub async fn submit_ticket(
        &self,
        request: SubmitTicketRequest,
    ) -> TicketLifecycleResult<SubmittedTicket> {
        let title = TicketTitle::new(request.title)?;
        let description = TicketDescription::new(request.description)?;
        let project = self
            .projects
            .find_by_id(request.project_id)
            .await?
            .ok_or(TicketLifecycleError::ProjectNotFound(request.project_id))?;

        self.ensure_budget_available(&project).await?;

        let ticket = Ticket::submit(
            NewTicket {
                client_id: request.client_id,
                project_id: request.project_id,
                title,
                description,
                priority: request.priority,
            },
            &*self.clock,
        );
        self.tickets.store(&ticket).await?;
        info!(
            ticket_id = %ticket.id(),
            project_id = %project.id(),
            client_id = %ticket.client_id(),
            priority = %ticket.priority(),
            "ticket submitted"
        );
        Ok(SubmittedTicket { ticket, project })
    }

    /// Applies an edit, committing the ticket and any time log atomically.
    ///
    /// The edit is recomputed from a fresh read whenever another writer wins
    /// the race, up to the policy's attempt limit. An edit that changes
    /// nothing returns the stored ticket without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::TicketNotFound`] for an unknown ticket,
    /// [`TicketLifecycleError::Repository`] carrying a revision conflict once
    /// attempts are exhausted, and domain or repository errors otherwise.
    pub async fn update_ticket(
        &self,
        request: UpdateTicketRequest,
    ) -> TicketLifecycleResult<TicketUpdateOutcome> {
        let ticket_id = request.ticket_id;
        let mut attempt = 1;
        loop {
            let current = self
                .tickets
                .find_by_id(ticket_id)
                .await?
                .ok_or(TicketLifecycleError::TicketNotFound(ticket_id))?;
            let now = self.clock.utc();

            let Some(edited) = request.edit.apply(&current, now, request.acting_user)? else {
                debug!(ticket_id = %ticket_id, "ticket update changed nothing");
                return Ok(TicketUpdateOutcome::unchanged(current, request.acting_user));
            };

            match self.tickets.commit(&TicketCommit::from(&edited)).await {
                Ok(()) => {
                    log_commit(&edited);
                    return Ok(TicketUpdateOutcome::committed(edited, request.acting_user));
                }
                Err(TicketRepositoryError::RevisionConflict {
                    expected, actual, ..
                }) if attempt < self.policy.max_commit_attempts => {
                    info!(
                        ticket_id = %ticket_id,
                        attempt,
                        expected,
                        actual,
                        "ticket changed concurrently; retrying update"
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Assigns a ticket to `user` and parks it in `pending`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TicketLifecycleService::update_ticket`].
    pub async fn assign_to_user(
        &self,
        ticket_id: TicketId,
        user: UserId,
    ) -> TicketLifecycleResult<TicketUpdateOutcome> {
        self.update_ticket(
            UpdateTicketRequest::new(ticket_id)
                .assign_to(user)
                .with_status(TicketStatus::Pending)
                .by(user),
        )
        .await
    }

    /// Overwrites a ticket's accumulated support time.
    ///
    /// Existing time logs are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TicketLifecycleService::update_ticket`].
    pub async fn correct_time_spent(
        &self,
        ticket_id: TicketId,
        seconds: u64,
        acting_user: Option<UserId>,
    ) -> TicketLifecycleResult<TicketUpdateOutcome> {
        let mut request = UpdateTicketRequest::new(ticket_id).correct_time_spent(seconds);
        if let Some(user) = acting_user {
            request = request.by(user);
        }
        self.update_ticket(request).await
    }

    /// Retrieves a ticket by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, ticket_id: TicketId) -> TicketLifecycleResult<Option<Ticket>> {
        Ok(self.tickets.find_by_id(ticket_id).await?)
    }

    /// Lists a client's tickets, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::Repository`] when lookup fails.
    pub async fn list_for_client(&self, client_id: ClientId) -> TicketLifecycleResult<Vec<Ticket>> {
        Ok(self.tickets.find_by_client(client_id).await?)
    }

    async fn ensure_budget_available(&self, project: &Project) -> TicketLifecycleResult<()> {
        let Some(limit) = project.support_limit() else {
            return Ok(());
        };
        let window = match self.policy.budget_period {
            BudgetPeriod::Lifetime => None,
            BudgetPeriod::CalendarMonth => Some(TimeWindow::month_containing(self.clock.utc())?),
        };
        let spent_seconds = self
            .tickets
            .total_seconds_for_project(project.id(), window)
            .await?;
        if limit.is_reached_by(spent_seconds) {
            warn!(
                project_id = %project.id(),
                spent_seconds,
                limit_seconds = limit.as_seconds(),
                "ticket refused: support hours exhausted"
            );
            return Err(TicketLifecycleError::SupportBudgetExhausted {
                project_id: project.id(),
                spent_seconds,
                limit_seconds: limit.as_seconds(),
            });
        }
        Ok(())
    }
}

fn log_commit(edited: &EditedTicket) {
    let ticket = &edited.ticket;
    if let Some(stop) = edited.timer_stop.filter(|stop| stop.clamped) {
        warn!(
            ticket_id = %ticket.id(),
            started_at = %stop.started_at,
            stopped_at = %stop.stopped_at,
            "in-progress interval ended before it started; credited zero seconds"
        );
    }
    if let Some(change) = edited.status_change() {
        info!(
            ticket_id = %ticket.id(),
            from = %change.from,
            to = %change.to,
            time_spent_seconds = ticket.time_spent_seconds(),
            "ticket status changed"
        );
    }
    if let Some(time_log) = &edited.time_log {
        debug!(
            ticket_id = %ticket.id(),
            time_log_id = %time_log.id(),
            seconds_spent = time_log.seconds_spent(),
            "time log recorded"
        );
    }
    debug!(ticket_id = %ticket.id(), revision = ticket.revision(), "ticket change committed");
}
