//! Status transition time accounting and the edit unit that commits it.
//!
//! [`apply_status_transition`] is a pure function: it never reads a clock or
//! touches storage. Callers pass `now` and persist the returned ticket and
//! time log together.

use super::{Ticket, TicketActivity, TicketDomainError, TicketPriority, TicketStatus, TimeLog, UserId};
use chrono::{DateTime, TimeDelta, Utc};

/// A status value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the transition.
    pub from: TicketStatus,
    /// Status after the transition.
    pub to: TicketStatus,
}

/// Details of an in-progress interval that was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerStop {
    /// When the interval started.
    pub started_at: DateTime<Utc>,
    /// When the interval was stopped.
    pub stopped_at: DateTime<Utc>,
    /// Whole seconds credited to the ticket.
    pub seconds: u64,
    /// Whether a negative elapsed time was clamped to zero.
    pub clamped: bool,
}

/// Result of evaluating a status transition against a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransitionOutcome {
    /// Ticket after the transition.
    pub ticket: Ticket,
    /// The status change, or `None` when the status did not change.
    pub change: Option<StatusChange>,
    /// Time log to append alongside the ticket write.
    pub time_log: Option<TimeLog>,
    /// Stopped interval, when the ticket left `in_progress`.
    pub timer_stop: Option<TimerStop>,
    /// User who requested the transition.
    pub acting_user: Option<UserId>,
}

/// Applies the timer start/stop rules of a status change.
///
/// Leaving `in_progress` with a running timer credits the elapsed time,
/// rounded to the nearest second and clamped at zero, to the ticket and emits
/// a [`TimeLog`] attributed to the ticket's assignee at stop time (which may
/// differ from `acting_user` and from whoever started the timer). Entering
/// `in_progress` starts the timer at `now`. Unchanged status is a no-op.
///
/// # Errors
///
/// Returns [`TicketDomainError::TimeAccumulatorOverflow`] when the credited
/// interval cannot be added to the accumulator.
pub fn apply_status_transition(
    ticket: &Ticket,
    new_status: TicketStatus,
    now: DateTime<Utc>,
    acting_user: Option<UserId>,
) -> Result<StatusTransitionOutcome, TicketDomainError> {
    let previous = ticket.status();
    if previous == new_status {
        return Ok(StatusTransitionOutcome {
            ticket: ticket.clone(),
            change: None,
            time_log: None,
            timer_stop: None,
            acting_user,
        });
    }

    let mut updated = ticket.clone();
    let mut time_log = None;
    let mut timer_stop = None;

    if let (TicketStatus::InProgress, Some(started_at)) = (previous, ticket.in_progress_started_at())
    {
        let (seconds, clamped) = elapsed_whole_seconds(started_at, now);
        updated.stop_timer(seconds)?;
        time_log = Some(TimeLog::record(ticket.id(), updated.assignee(), seconds, now));
        timer_stop = Some(TimerStop {
            started_at,
            stopped_at: now,
            seconds,
            clamped,
        });
    }

    if new_status.is_timed() {
        updated.start_timer(now);
    }
    updated.set_status(new_status);
    updated.touch(now);

    Ok(StatusTransitionOutcome {
        ticket: updated,
        change: Some(StatusChange {
            from: previous,
            to: new_status,
        }),
        time_log,
        timer_stop,
        acting_user,
    })
}

/// Returns elapsed whole seconds (half-up) and whether clamping occurred.
fn elapsed_whole_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> (u64, bool) {
    let elapsed = now.signed_duration_since(started_at);
    if elapsed < TimeDelta::zero() {
        return (0, true);
    }
    let rounded = elapsed
        .checked_add(&TimeDelta::milliseconds(500))
        .unwrap_or(elapsed);
    (u64::try_from(rounded.num_seconds()).unwrap_or_default(), false)
}

/// A set of field changes applied to a ticket as one committed unit.
///
/// Fields apply in a fixed order: assignee, priority, time correction and
/// finally status, so a status change that stops the timer credits the
/// assignee set in the same edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketEdit {
    status: Option<TicketStatus>,
    priority: Option<TicketPriority>,
    assignee: Option<Option<UserId>>,
    time_spent_seconds: Option<u64>,
}

/// A ticket edit ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedTicket {
    /// Ticket after the edit, with its revision advanced.
    pub ticket: Ticket,
    /// Revision the edit was computed from.
    pub expected_revision: u64,
    /// Time log to append in the same commit.
    pub time_log: Option<TimeLog>,
    /// Stopped interval, when the edit left `in_progress`.
    pub timer_stop: Option<TimerStop>,
    /// Changes made, in application order.
    pub activities: Vec<TicketActivity>,
}

impl EditedTicket {
    /// Returns the status change made by the edit, if any.
    #[must_use]
    pub fn status_change(&self) -> Option<StatusChange> {
        self.activities.iter().find_map(|activity| match *activity {
            TicketActivity::StatusChanged { from, to } => Some(StatusChange { from, to }),
            _ => None,
        })
    }
}

impl TicketEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a status change.
    #[must_use]
    pub const fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requests a priority change.
    #[must_use]
    pub const fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Assigns the ticket to `user`.
    #[must_use]
    pub const fn assign_to(mut self, user: UserId) -> Self {
        self.assignee = Some(Some(user));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub const fn unassign(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    /// Overwrites the accumulated support time.
    ///
    /// This is the only path that may lower the accumulator. A running timer
    /// is left untouched.
    #[must_use]
    pub const fn correct_time_spent(mut self, seconds: u64) -> Self {
        self.time_spent_seconds = Some(seconds);
        self
    }

    /// Returns whether the edit requests no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.time_spent_seconds.is_none()
    }

    /// Applies the edit to `ticket` at `now`.
    ///
    /// Returns `Ok(None)` when every requested value already matches, so no
    /// write is needed and no time log is produced.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError`] when time accounting overflows or the
    /// revision counter is exhausted.
    pub fn apply(
        &self,
        ticket: &Ticket,
        now: DateTime<Utc>,
        acting_user: Option<UserId>,
    ) -> Result<Option<EditedTicket>, TicketDomainError> {
        let mut working = ticket.clone();
        let mut activities = Vec::new();

        if let Some(assignee) = self.assignee.filter(|next| *next != working.assignee()) {
            activities.push(TicketActivity::AssigneeChanged {
                from: working.assignee(),
                to: assignee,
            });
            working.set_assignee(assignee);
        }

        if let Some(priority) = self.priority.filter(|next| *next != working.priority()) {
            activities.push(TicketActivity::PriorityChanged {
                from: working.priority(),
                to: priority,
            });
            working.set_priority(priority);
        }

        if let Some(seconds) = self
            .time_spent_seconds
            .filter(|next| *next != working.time_spent_seconds())
        {
            activities.push(TicketActivity::TimeCorrected {
                from: working.time_spent_seconds(),
                to: seconds,
            });
            working.set_time_spent(seconds);
        }

        let mut time_log = None;
        let mut timer_stop = None;
        if let Some(status) = self.status {
            let outcome = apply_status_transition(&working, status, now, acting_user)?;
            if let Some(change) = outcome.change {
                activities.push(TicketActivity::StatusChanged {
                    from: change.from,
                    to: change.to,
                });
            }
            working = outcome.ticket;
            time_log = outcome.time_log;
            timer_stop = outcome.timer_stop;
        }

        if activities.is_empty() {
            return Ok(None);
        }

        working.touch(now);
        working.advance_revision()?;
        Ok(Some(EditedTicket {
            ticket: working,
            expected_revision: ticket.revision(),
            time_log,
            timer_stop,
            activities,
        }))
    }
}
