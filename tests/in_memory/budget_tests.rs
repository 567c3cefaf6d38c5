//! Support-hour limit enforcement on ticket submission.

use super::helpers::{DeskHarness, harness};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use ticketdesk::config::{BudgetPeriod, DeskConfig};
use ticketdesk::ticket::adapters::memory::InMemoryMailbox;
use ticketdesk::ticket::domain::TicketStatus;
use ticketdesk::ticket::services::TicketLifecycleError;

async fn work_hours(harness: &DeskHarness, hours: i64) -> ticketdesk::ticket::domain::Project {
    let project = harness.project(Some(10)).await;
    let ticket = harness
        .submit(&project, "Quarterly maintenance")
        .await
        .expect("ticket should be submitted");
    harness
        .set_status(ticket.id(), TicketStatus::InProgress)
        .await
        .expect("start work");
    harness.wait(hours * 3_600);
    harness
        .set_status(ticket.id(), TicketStatus::Closed)
        .await
        .expect("close ticket");
    project
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_project_rejects_new_tickets(harness: DeskHarness) {
    let project = work_hours(&harness, 10).await;

    let result = harness.submit(&project, "One more thing").await;

    match result {
        Err(TicketLifecycleError::SupportBudgetExhausted {
            project_id,
            spent_seconds,
            limit_seconds,
        }) => {
            assert_eq!(project_id, project.id());
            assert_eq!(spent_seconds, 36_000);
            assert_eq!(limit_seconds, 36_000);
        }
        other => panic!("expected SupportBudgetExhausted, got {other:?}"),
    }
    let tickets = harness
        .desk
        .lifecycle()
        .list_for_client(harness.client)
        .await
        .expect("tickets should list");
    assert_eq!(tickets.len(), 1, "no ticket row is created on refusal");
    assert_eq!(harness.mailbox.sent().len(), 1, "only the first ticket notified");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_under_limit_accepts_tickets(harness: DeskHarness) {
    let project = work_hours(&harness, 9).await;

    let ticket = harness
        .submit(&project, "One more thing")
        .await
        .expect("ticket should be accepted");

    assert_eq!(ticket.status(), TicketStatus::Open);
    let summary = harness
        .reports
        .project_summary(project.id(), None)
        .await
        .expect("summary should load");
    assert_eq!(summary.remaining_seconds(), Some(3_600));
    assert_eq!(summary.spent_display(), "09:00:00");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn monthly_budget_reopens_next_month() {
    let config = DeskConfig {
        budget_period: BudgetPeriod::CalendarMonth,
        ..DeskConfig::default()
    };
    let harness = DeskHarness::new(&config, InMemoryMailbox::new());
    let project = work_hours(&harness, 10).await;
    assert!(matches!(
        harness.submit(&project, "Still March").await,
        Err(TicketLifecycleError::SupportBudgetExhausted { .. })
    ));

    harness.clock.set(
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    );

    let ticket = harness
        .submit(&project, "New month")
        .await
        .expect("budget resets with the calendar month");
    assert_eq!(ticket.status(), TicketStatus::Open);
}
