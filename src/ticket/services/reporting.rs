//! Read-side time reports over the time log.

use crate::ticket::{
    domain::{ProjectId, SupportHourLimit, TicketId, TimeLog, TimeWindow, format_duration},
    ports::{ProjectRepository, ProjectRepositoryError, TicketRepositoryError, TimeLogRepository},
};
use std::sync::Arc;
use thiserror::Error;

/// Support time consumed by a project against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTimeSummary {
    /// Project reported on.
    pub project_id: ProjectId,
    /// Window the time was summed over. `None` means all time.
    pub window: Option<TimeWindow>,
    /// Seconds logged in the window.
    pub spent_seconds: u64,
    /// Configured support limit, if the project has one.
    pub limit: Option<SupportHourLimit>,
}

impl ProjectTimeSummary {
    /// Returns the limit in seconds, if the project has one.
    #[must_use]
    pub fn limit_seconds(&self) -> Option<u64> {
        self.limit.map(SupportHourLimit::as_seconds)
    }

    /// Returns the seconds left before the limit, if the project has one.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.limit
            .map(|limit| limit.remaining_after(self.spent_seconds))
    }

    /// Returns whether the limit has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.limit
            .is_some_and(|limit| limit.is_reached_by(self.spent_seconds))
    }

    /// Returns the spent time as `HH:MM:SS`.
    #[must_use]
    pub fn spent_display(&self) -> String {
        format_duration(self.spent_seconds)
    }
}

/// Errors raised by time reports.
#[derive(Debug, Error)]
pub enum TimeReportError {
    /// Time log lookup failed.
    #[error(transparent)]
    Repository(#[from] TicketRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
}

/// Time aggregation queries.
#[derive(Clone)]
pub struct TimeReportService<T, P>
where
    T: TimeLogRepository,
    P: ProjectRepository,
{
    time_logs: Arc<T>,
    projects: Arc<P>,
}

impl<T, P> TimeReportService<T, P>
where
    T: TimeLogRepository,
    P: ProjectRepository,
{
    /// Creates a report service.
    #[must_use]
    pub const fn new(time_logs: Arc<T>, projects: Arc<P>) -> Self {
        Self {
            time_logs,
            projects,
        }
    }

    /// Sums logged seconds for a project, optionally within `window`.
    ///
    /// Returns zero for a project without logs.
    ///
    /// # Errors
    ///
    /// Returns [`TimeReportError::Repository`] when aggregation fails.
    pub async fn project_total_seconds(
        &self,
        project_id: ProjectId,
        window: Option<TimeWindow>,
    ) -> Result<u64, TimeReportError> {
        Ok(self
            .time_logs
            .total_seconds_for_project(project_id, window)
            .await?)
    }

    /// Reports a project's logged time against its support limit.
    ///
    /// # Errors
    ///
    /// Returns [`TimeReportError::ProjectNotFound`] for an unknown project and
    /// repository errors otherwise.
    pub async fn project_summary(
        &self,
        project_id: ProjectId,
        window: Option<TimeWindow>,
    ) -> Result<ProjectTimeSummary, TimeReportError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(TimeReportError::ProjectNotFound(project_id))?;
        let spent_seconds = self.project_total_seconds(project_id, window).await?;
        Ok(ProjectTimeSummary {
            project_id,
            window,
            spent_seconds,
            limit: project.support_limit(),
        })
    }

    /// Lists a ticket's time logs, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TimeReportError::Repository`] when lookup fails.
    pub async fn ticket_time_logs(&self, ticket_id: TicketId) -> Result<Vec<TimeLog>, TimeReportError> {
        Ok(self.time_logs.list_for_ticket(ticket_id).await?)
    }
}
