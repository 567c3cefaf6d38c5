//! Support desk facade wiring ticket lifecycle, activity trail and
//! notifications together.
//!
//! Ticket writes are the source of truth. Notification and activity failures
//! are logged and never undo or fail a committed ticket change.

use super::{
    ActivityRecorder, ClientContact, SubmitTicketRequest, TicketLifecycleResult,
    TicketLifecycleService, TicketNotifier, TicketUpdateOutcome, UpdateTicketRequest,
};
use crate::ticket::{
    domain::{Ticket, TicketId, UserId},
    ports::{
        ActivityLogRepository, MailTransport, ProjectRepository, TicketRepository,
        TimeLogRepository,
    },
};
use mockable::Clock;
use tracing::warn;

/// Entry point for ticket operations made through the support portals.
pub struct SupportDesk<R, P, A, M, C>
where
    R: TicketRepository + TimeLogRepository,
    P: ProjectRepository,
    A: ActivityLogRepository,
    M: MailTransport,
    C: Clock + Send + Sync,
{
    lifecycle: TicketLifecycleService<R, P, C>,
    activity: ActivityRecorder<A, C>,
    notifier: TicketNotifier<M>,
}

impl<R, P, A, M, C> SupportDesk<R, P, A, M, C>
where
    R: TicketRepository + TimeLogRepository,
    P: ProjectRepository,
    A: ActivityLogRepository,
    M: MailTransport,
    C: Clock + Send + Sync,
{
    /// Creates a desk from its collaborating services.
    #[must_use]
    pub const fn new(
        lifecycle: TicketLifecycleService<R, P, C>,
        activity: ActivityRecorder<A, C>,
        notifier: TicketNotifier<M>,
    ) -> Self {
        Self {
            lifecycle,
            activity,
            notifier,
        }
    }

    /// Returns the lifecycle service for reads.
    #[must_use]
    pub const fn lifecycle(&self) -> &TicketLifecycleService<R, P, C> {
        &self.lifecycle
    }

    /// Returns the activity recorder for trail lookups.
    #[must_use]
    pub const fn activity(&self) -> &ActivityRecorder<A, C> {
        &self.activity
    }

    /// Submits a ticket on behalf of a client and notifies the admin.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TicketLifecycleService::submit_ticket`].
    /// Notification failures are logged only.
    pub async fn submit_ticket(
        &self,
        request: SubmitTicketRequest,
        client: &ClientContact,
    ) -> TicketLifecycleResult<Ticket> {
        let submitted = self.lifecycle.submit_ticket(request).await?;
        if let Err(err) = self
            .notifier
            .notify_new_ticket(&submitted.ticket, Some(&submitted.project), client)
            .await
        {
            warn!(
                ticket_id = %submitted.ticket.id(),
                error = %err,
                "failed to send new ticket notification"
            );
        }
        Ok(submitted.ticket)
    }

    /// Applies a ticket edit and records its activity trail.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TicketLifecycleService::update_ticket`].
    /// Activity trail failures are logged only.
    pub async fn update_ticket(
        &self,
        request: UpdateTicketRequest,
    ) -> TicketLifecycleResult<TicketUpdateOutcome> {
        let outcome = self.lifecycle.update_ticket(request).await?;
        self.record_activity(&outcome).await;
        Ok(outcome)
    }

    /// Assigns a ticket to the requesting staff member.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TicketLifecycleService::assign_to_user`].
    pub async fn assign_to_me(
        &self,
        ticket_id: TicketId,
        user: UserId,
    ) -> TicketLifecycleResult<TicketUpdateOutcome> {
        let outcome = self.lifecycle.assign_to_user(ticket_id, user).await?;
        self.record_activity(&outcome).await;
        Ok(outcome)
    }

    /// Overwrites a ticket's accumulated support time.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TicketLifecycleService::correct_time_spent`].
    pub async fn correct_time_spent(
        &self,
        ticket_id: TicketId,
        seconds: u64,
        acting_user: Option<UserId>,
    ) -> TicketLifecycleResult<TicketUpdateOutcome> {
        let outcome = self
            .lifecycle
            .correct_time_spent(ticket_id, seconds, acting_user)
            .await?;
        self.record_activity(&outcome).await;
        Ok(outcome)
    }

    async fn record_activity(&self, outcome: &TicketUpdateOutcome) {
        if !outcome.changed() {
            return;
        }
        if let Err(err) = self.activity.record_outcome(outcome).await {
            warn!(
                ticket_id = %outcome.ticket.id(),
                error = %err,
                "failed to record ticket activity"
            );
        }
    }
}
