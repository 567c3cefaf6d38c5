//! End-to-end status transition and time log tests.

use super::helpers::{DeskHarness, harness};
use rstest::rstest;
use ticketdesk::ticket::domain::{TicketPriority, TicketStatus, TimeLog, UserId};
use ticketdesk::ticket::services::UpdateTicketRequest;

fn logged_seconds(logs: &[TimeLog]) -> Vec<u64> {
    logs.iter().map(TimeLog::seconds_spent).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_then_pending_logs_ninety_seconds(harness: DeskHarness) {
    let project = harness.project(None).await;
    let ticket = harness
        .submit(&project, "Printer offline")
        .await
        .expect("ticket should be submitted");
    assert_eq!(ticket.status(), TicketStatus::Open);

    harness
        .set_status(ticket.id(), TicketStatus::InProgress)
        .await
        .expect("start work");
    harness.wait(90);
    let pending = harness
        .set_status(ticket.id(), TicketStatus::Pending)
        .await
        .expect("pause work");

    let logs = harness
        .reports
        .ticket_time_logs(ticket.id())
        .await
        .expect("time logs should load");
    assert_eq!(logged_seconds(&logs), vec![90]);
    assert_eq!(pending.time_spent_seconds(), 90);
    assert_eq!(pending.in_progress_started_at(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_from_in_progress_adds_an_hour(harness: DeskHarness) {
    let project = harness.project(None).await;
    let ticket = harness
        .submit(&project, "Mailbox full")
        .await
        .expect("ticket should be submitted");
    harness
        .set_status(ticket.id(), TicketStatus::InProgress)
        .await
        .expect("start work");
    harness.wait(300);
    harness
        .set_status(ticket.id(), TicketStatus::Pending)
        .await
        .expect("pause work");
    harness
        .set_status(ticket.id(), TicketStatus::InProgress)
        .await
        .expect("resume work");
    harness.wait(3_600);

    let closed = harness
        .set_status(ticket.id(), TicketStatus::Closed)
        .await
        .expect("close ticket");

    let logs = harness
        .reports
        .ticket_time_logs(ticket.id())
        .await
        .expect("time logs should load");
    assert_eq!(logged_seconds(&logs), vec![300, 3_600]);
    assert_eq!(closed.time_spent_seconds(), 300 + 3_600);
    assert_eq!(closed.status(), TicketStatus::Closed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_only_update_leaves_time_untouched(harness: DeskHarness) {
    let project = harness.project(None).await;
    let ticket = harness
        .submit(&project, "Slow VPN")
        .await
        .expect("ticket should be submitted");
    let pending = harness
        .set_status(ticket.id(), TicketStatus::Pending)
        .await
        .expect("park ticket");
    harness.wait(600);

    let outcome = harness
        .desk
        .update_ticket(
            UpdateTicketRequest::new(ticket.id())
                .with_status(TicketStatus::Pending)
                .with_priority(TicketPriority::High),
        )
        .await
        .expect("priority update");

    assert_eq!(outcome.time_log, None);
    assert_eq!(outcome.ticket.priority(), TicketPriority::High);
    assert_eq!(
        outcome.ticket.time_spent_seconds(),
        pending.time_spent_seconds()
    );
    assert!(
        harness
            .reports
            .ticket_time_logs(ticket.id())
            .await
            .expect("time logs should load")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn time_follows_assignee_at_stop_time(harness: DeskHarness) {
    let project = harness.project(None).await;
    let ticket = harness
        .submit(&project, "Server room too warm")
        .await
        .expect("ticket should be submitted");
    let first = UserId::new();
    let second = UserId::new();

    harness
        .desk
        .assign_to_me(ticket.id(), first)
        .await
        .expect("first user takes the ticket");
    harness
        .set_status(ticket.id(), TicketStatus::InProgress)
        .await
        .expect("start work");
    harness.wait(1_200);
    harness
        .desk
        .update_ticket(UpdateTicketRequest::new(ticket.id()).assign_to(second).by(first))
        .await
        .expect("hand over mid-interval");
    harness.wait(600);
    harness
        .set_status(ticket.id(), TicketStatus::Closed)
        .await
        .expect("close ticket");

    let logs = harness
        .reports
        .ticket_time_logs(ticket.id())
        .await
        .expect("time logs should load");
    assert_eq!(logs.len(), 1);
    let log = logs.first().expect("one time log");
    assert_eq!(log.seconds_spent(), 1_800);
    assert_eq!(log.user_id(), Some(second));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_listing_shows_latest_first(harness: DeskHarness) {
    let project = harness.project(None).await;
    let older = harness
        .submit(&project, "First issue")
        .await
        .expect("first ticket");
    harness.wait(60);
    let newer = harness
        .submit(&project, "Second issue")
        .await
        .expect("second ticket");

    let listed = harness
        .desk
        .lifecycle()
        .list_for_client(harness.client)
        .await
        .expect("tickets should list");

    let ids: Vec<_> = listed.iter().map(|ticket| ticket.id()).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
}
