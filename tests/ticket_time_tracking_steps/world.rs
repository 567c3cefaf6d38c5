//! Shared world state for ticket time tracking BDD scenarios.

use crate::test_helpers::{ManualClock, working_day_start};
use rstest::fixture;
use std::sync::Arc;
use ticketdesk::ticket::{
    adapters::memory::{InMemoryProjectRepository, InMemoryTicketRepository},
    domain::{ClientId, Project, Ticket},
    services::{TicketLifecycleError, TicketLifecycleService, TimeReportService},
};

/// Service type used by the BDD world.
pub type TestLifecycleService =
    TicketLifecycleService<InMemoryTicketRepository, InMemoryProjectRepository, ManualClock>;

/// Scenario world for time tracking behaviour tests.
pub struct TimeTrackingWorld {
    pub service: TestLifecycleService,
    pub reports: TimeReportService<InMemoryTicketRepository, InMemoryProjectRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub clock: Arc<ManualClock>,
    pub client: ClientId,
    pub project: Option<Project>,
    pub ticket: Option<Ticket>,
    pub last_submission: Option<Result<Ticket, TicketLifecycleError>>,
}

impl TimeTrackingWorld {
    /// Creates a world with empty repositories and a frozen clock.
    #[must_use]
    pub fn new() -> Self {
        let tickets = Arc::new(InMemoryTicketRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let clock = Arc::new(ManualClock::starting_at(working_day_start()));
        let service = TicketLifecycleService::new(
            Arc::clone(&tickets),
            Arc::clone(&projects),
            Arc::clone(&clock),
        );

        Self {
            service,
            reports: TimeReportService::new(tickets, Arc::clone(&projects)),
            projects,
            clock,
            client: ClientId::new(),
            project: None,
            ticket: None,
            last_submission: None,
        }
    }

    /// Returns the scenario ticket.
    pub fn ticket(&self) -> Result<&Ticket, eyre::Report> {
        self.ticket
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing ticket in scenario world"))
    }

    /// Returns the scenario project.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }
}

impl Default for TimeTrackingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TimeTrackingWorld {
    TimeTrackingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
