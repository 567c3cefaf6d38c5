//! Read-side port for time log queries.

use super::TicketRepositoryResult;
use crate::ticket::domain::{ProjectId, TicketId, TimeLog, TimeWindow};
use async_trait::async_trait;

/// Time log query contract.
///
/// Reads never lock tickets and may run alongside commits.
#[async_trait]
pub trait TimeLogRepository: Send + Sync {
    /// Returns the time logs of a ticket, oldest first.
    async fn list_for_ticket(&self, ticket_id: TicketId) -> TicketRepositoryResult<Vec<TimeLog>>;

    /// Sums `seconds_spent` over a project's tickets.
    ///
    /// When `window` is set only logs flushed inside it count. Returns zero
    /// when nothing matches.
    async fn total_seconds_for_project(
        &self,
        project_id: ProjectId,
        window: Option<TimeWindow>,
    ) -> TicketRepositoryResult<u64>;
}
