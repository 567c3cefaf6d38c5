//! Activity trail recording for committed ticket changes.

use super::TicketUpdateOutcome;
use crate::ticket::{
    domain::{ActivityLog, Locale, TicketActivity, TicketId, UserId},
    ports::{ActivityLogRepository, ActivityLogResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Renders ticket changes in the configured locale and appends them to the
/// activity trail.
#[derive(Clone)]
pub struct ActivityRecorder<A, C>
where
    A: ActivityLogRepository,
    C: Clock + Send + Sync,
{
    log: Arc<A>,
    clock: Arc<C>,
    locale: Locale,
}

impl<A, C> ActivityRecorder<A, C>
where
    A: ActivityLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a recorder writing descriptions in `locale`.
    #[must_use]
    pub const fn new(log: Arc<A>, clock: Arc<C>, locale: Locale) -> Self {
        Self { log, clock, locale }
    }

    /// Returns the description locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Appends one entry per activity, in order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ticket::ports::ActivityLogError`] when an append
    /// fails. Entries appended before the failure are kept.
    pub async fn record(
        &self,
        ticket_id: TicketId,
        user_id: Option<UserId>,
        activities: &[TicketActivity],
    ) -> ActivityLogResult<Vec<ActivityLog>> {
        let created_at = self.clock.utc();
        let mut entries = Vec::with_capacity(activities.len());
        for activity in activities {
            let entry =
                ActivityLog::new(ticket_id, user_id, activity.describe(self.locale), created_at);
            self.log.append(&entry).await?;
            debug!(ticket_id = %ticket_id, entry_id = %entry.id(), "activity recorded");
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Appends the activities of a committed update.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ActivityRecorder::record`].
    pub async fn record_outcome(
        &self,
        outcome: &TicketUpdateOutcome,
    ) -> ActivityLogResult<Vec<ActivityLog>> {
        self.record(outcome.ticket.id(), outcome.acting_user, &outcome.activities)
            .await
    }

    /// Returns a ticket's activity trail, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ticket::ports::ActivityLogError`] when lookup fails.
    pub async fn history(&self, ticket_id: TicketId) -> ActivityLogResult<Vec<ActivityLog>> {
        self.log.list_for_ticket(ticket_id).await
    }
}
