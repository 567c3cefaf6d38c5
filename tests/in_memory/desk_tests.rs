//! Side effects of desk operations: notifications and the activity trail.

use super::helpers::{DeskHarness, harness};
use crate::test_helpers::{ManualClock, working_day_start};
use async_trait::async_trait;
use rstest::rstest;
use std::sync::Arc;
use ticketdesk::config::DeskConfig;
use ticketdesk::ticket::{
    adapters::memory::{InMemoryMailbox, InMemoryProjectRepository, InMemoryTicketRepository},
    domain::{ActivityLog, Locale, Project, ProjectName, TicketId, TicketStatus, UserId},
    ports::{ActivityLogError, ActivityLogRepository, ActivityLogResult, MailError, ProjectRepository},
    services::{
        ActivityRecorder, ClientContact, SubmitTicketRequest, SupportDesk, TicketLifecycleService,
        TicketNotifier, UpdateTicketRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_notifies_admin(harness: DeskHarness) {
    let project = harness.project(None).await;

    harness
        .submit(&project, "Printer offline")
        .await
        .expect("ticket should be submitted");

    let sent = harness.mailbox.sent();
    assert_eq!(sent.len(), 1);
    let email = sent.first().expect("one email");
    assert_eq!(email.to, DeskConfig::default().admin_email);
    assert_eq!(
        email.subject,
        "New ticket: Printer offline [Project: Acme intranet]"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mail_failure_does_not_fail_submission() {
    let harness = DeskHarness::new(
        &DeskConfig::default(),
        InMemoryMailbox::failing(MailError::NotConfigured("no relay".to_owned())),
    );
    let project = harness.project(None).await;

    let ticket = harness
        .submit(&project, "Printer offline")
        .await
        .expect("submission succeeds without mail");

    let stored = harness
        .desk
        .lifecycle()
        .find_by_id(ticket.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(ticket));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_are_recorded_in_configured_locale() {
    let config = DeskConfig {
        locale: Locale::PtBr,
        ..DeskConfig::default()
    };
    let harness = DeskHarness::new(&config, InMemoryMailbox::new());
    let project = harness.project(None).await;
    let ticket = harness
        .submit(&project, "Impressora parada")
        .await
        .expect("ticket should be submitted");
    let staff = UserId::new();

    harness
        .desk
        .assign_to_me(ticket.id(), staff)
        .await
        .expect("assignment");
    harness.wait(5);
    harness
        .desk
        .update_ticket(
            UpdateTicketRequest::new(ticket.id())
                .with_status(TicketStatus::InProgress)
                .by(staff),
        )
        .await
        .expect("start work");

    let history = harness
        .desk
        .activity()
        .history(ticket.id())
        .await
        .expect("history should load");
    let descriptions: Vec<String> = history
        .iter()
        .map(|entry| entry.description().to_owned())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            format!("Chamado atribuído ao usuário {staff}"),
            "Status alterado de \"Aberto\" para \"Pendente\"".to_owned(),
            "Status alterado de \"Pendente\" para \"Em Andamento\"".to_owned(),
        ]
    );
    assert!(history.iter().all(|entry| entry.user_id() == Some(staff)));
    assert!(
        harness
            .activity_log
            .list_for_ticket(ticket.id())
            .await
            .expect("raw log should load")
            .len()
            == 3
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unchanged_update_records_no_activity(harness: DeskHarness) {
    let project = harness.project(None).await;
    let ticket = harness
        .submit(&project, "Printer offline")
        .await
        .expect("ticket should be submitted");

    let outcome = harness
        .desk
        .update_ticket(UpdateTicketRequest::new(ticket.id()).with_status(TicketStatus::Open))
        .await
        .expect("no-op update");

    assert!(!outcome.changed());
    assert!(
        harness
            .desk
            .activity()
            .history(ticket.id())
            .await
            .expect("history should load")
            .is_empty()
    );
}

/// Activity log that refuses every write.
struct BrokenActivityLog;

#[async_trait]
impl ActivityLogRepository for BrokenActivityLog {
    async fn append(&self, _entry: &ActivityLog) -> ActivityLogResult<()> {
        Err(ActivityLogError::persistence(std::io::Error::other("disk full")))
    }

    async fn list_for_ticket(&self, _ticket_id: TicketId) -> ActivityLogResult<Vec<ActivityLog>> {
        Ok(Vec::new())
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activity_failure_does_not_fail_update() {
    let projects = Arc::new(InMemoryProjectRepository::new());
    let clock = Arc::new(ManualClock::starting_at(working_day_start()));
    let desk = SupportDesk::new(
        TicketLifecycleService::new(
            Arc::new(InMemoryTicketRepository::new()),
            Arc::clone(&projects),
            Arc::clone(&clock),
        ),
        ActivityRecorder::new(Arc::new(BrokenActivityLog), Arc::clone(&clock), Locale::En),
        TicketNotifier::new(
            Arc::new(InMemoryMailbox::new()),
            (&DeskConfig::default()).into(),
        )
        .expect("bundled templates should compile"),
    );
    let project = Project::new(
        ProjectName::new("Acme intranet").expect("valid name"),
        &*clock,
    );
    projects.store(&project).await.expect("project stored");
    let ticket = desk
        .submit_ticket(
            SubmitTicketRequest::new(
                ticketdesk::ticket::domain::ClientId::new(),
                project.id(),
                "Printer offline",
                "It blinks orange.",
            ),
            &ClientContact::new("Maria Souza", "maria@example.com"),
        )
        .await
        .expect("ticket should be submitted");

    let outcome = desk
        .update_ticket(UpdateTicketRequest::new(ticket.id()).with_status(TicketStatus::Closed))
        .await
        .expect("update succeeds even though the trail is down");

    assert_eq!(outcome.ticket.status(), TicketStatus::Closed);
}
