//! Shared test helpers for in-memory support desk integration tests.

use crate::test_helpers::{ManualClock, working_day_start};
use chrono::TimeDelta;
use rstest::fixture;
use std::sync::Arc;
use ticketdesk::config::DeskConfig;
use ticketdesk::ticket::{
    adapters::memory::{
        InMemoryActivityLogRepository, InMemoryMailbox, InMemoryProjectRepository,
        InMemoryTicketRepository,
    },
    domain::{ClientId, Project, ProjectName, SupportHourLimit, Ticket, TicketId, TicketStatus},
    ports::ProjectRepository,
    services::{
        ActivityRecorder, ClientContact, LifecyclePolicy, SubmitTicketRequest, SupportDesk,
        TicketLifecycleError, TicketLifecycleService, TicketNotifier, TimeReportService,
        UpdateTicketRequest,
    },
};

/// Desk type wired to in-memory adapters.
pub type TestDesk = SupportDesk<
    InMemoryTicketRepository,
    InMemoryProjectRepository,
    InMemoryActivityLogRepository,
    InMemoryMailbox,
    ManualClock,
>;

/// A support desk together with handles on its in-memory adapters.
pub struct DeskHarness {
    pub desk: TestDesk,
    pub reports: TimeReportService<InMemoryTicketRepository, InMemoryProjectRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub activity_log: Arc<InMemoryActivityLogRepository>,
    pub mailbox: Arc<InMemoryMailbox>,
    pub clock: Arc<ManualClock>,
    pub client: ClientId,
}

impl DeskHarness {
    /// Builds a desk from `config` delivering mail into `mailbox`.
    pub fn new(config: &DeskConfig, mailbox: InMemoryMailbox) -> Self {
        let tickets = Arc::new(InMemoryTicketRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let activity_log = Arc::new(InMemoryActivityLogRepository::new());
        let mailbox = Arc::new(mailbox);
        let clock = Arc::new(ManualClock::starting_at(working_day_start()));

        let lifecycle = TicketLifecycleService::new(
            Arc::clone(&tickets),
            Arc::clone(&projects),
            Arc::clone(&clock),
        )
        .with_policy(LifecyclePolicy::from(config));
        let activity =
            ActivityRecorder::new(Arc::clone(&activity_log), Arc::clone(&clock), config.locale);
        let notifier = TicketNotifier::new(Arc::clone(&mailbox), config.into())
            .expect("bundled templates should compile");

        Self {
            desk: SupportDesk::new(lifecycle, activity, notifier),
            reports: TimeReportService::new(tickets, Arc::clone(&projects)),
            projects,
            activity_log,
            mailbox,
            clock,
            client: ClientId::new(),
        }
    }

    /// Stores a project with an optional support-hour limit.
    pub async fn project(&self, limit_hours: Option<u32>) -> Project {
        let mut project = Project::new(
            ProjectName::new("Acme intranet").expect("valid project name"),
            &*self.clock,
        );
        if let Some(hours) = limit_hours {
            project = project.with_support_limit(SupportHourLimit::from_hours(hours));
        }
        self.projects
            .store(&project)
            .await
            .expect("project should be stored");
        project
    }

    /// Submits a ticket for the harness client.
    pub async fn submit(&self, project: &Project, title: &str) -> Result<Ticket, TicketLifecycleError> {
        self.desk
            .submit_ticket(
                SubmitTicketRequest::new(
                    self.client,
                    project.id(),
                    title,
                    "Reported through the client portal.",
                ),
                &ClientContact::new("Maria Souza", "maria@example.com"),
            )
            .await
    }

    /// Moves a ticket to `status` at the current clock time.
    pub async fn set_status(
        &self,
        ticket_id: TicketId,
        status: TicketStatus,
    ) -> Result<Ticket, TicketLifecycleError> {
        self.desk
            .update_ticket(UpdateTicketRequest::new(ticket_id).with_status(status))
            .await
            .map(|outcome| outcome.ticket)
    }

    /// Advances the harness clock by whole seconds.
    pub fn wait(&self, seconds: i64) {
        self.clock.advance(TimeDelta::seconds(seconds));
    }
}

/// Provides a desk with default configuration.
#[fixture]
pub fn harness() -> DeskHarness {
    DeskHarness::new(&DeskConfig::default(), InMemoryMailbox::new())
}
