//! Then steps for ticket time tracking BDD scenarios.

use super::world::{TimeTrackingWorld, run_async};
use rstest_bdd_macros::then;
use ticketdesk::ticket::{domain::TicketStatus, services::TicketLifecycleError};

#[then(r#"the ticket status is "{status}""#)]
fn ticket_status_is(world: &TimeTrackingWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TicketStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let ticket = world.ticket()?;
    if ticket.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            ticket.status()
        ));
    }
    Ok(())
}

#[then("the ticket has {seconds:u64} seconds of support time")]
fn ticket_support_time(world: &TimeTrackingWorld, seconds: u64) -> Result<(), eyre::Report> {
    let actual = world.ticket()?.time_spent_seconds();
    if actual != seconds {
        return Err(eyre::eyre!("expected {seconds}s of support time, found {actual}s"));
    }
    Ok(())
}

#[then("the ticket has {count:usize} time log totalling {seconds:u64} seconds")]
fn ticket_time_log_single(
    world: &TimeTrackingWorld,
    count: usize,
    seconds: u64,
) -> Result<(), eyre::Report> {
    check_time_logs(world, count, seconds)
}

#[then("the ticket has {count:usize} time logs totalling {seconds:u64} seconds")]
fn ticket_time_logs_plural(
    world: &TimeTrackingWorld,
    count: usize,
    seconds: u64,
) -> Result<(), eyre::Report> {
    check_time_logs(world, count, seconds)
}

fn check_time_logs(
    world: &TimeTrackingWorld,
    count: usize,
    seconds: u64,
) -> Result<(), eyre::Report> {
    let logs = run_async(world.reports.ticket_time_logs(world.ticket()?.id()))?;
    let total: u64 = logs.iter().map(|log| log.seconds_spent()).sum();
    if logs.len() != count || total != seconds {
        return Err(eyre::eyre!(
            "expected {count} logs totalling {seconds}s, found {} totalling {total}s",
            logs.len()
        ));
    }
    Ok(())
}

#[then("the ticket timer is stopped")]
fn ticket_timer_stopped(world: &TimeTrackingWorld) -> Result<(), eyre::Report> {
    if let Some(started_at) = world.ticket()?.in_progress_started_at() {
        return Err(eyre::eyre!("timer still running since {started_at}"));
    }
    Ok(())
}

#[then("the submission is refused because support hours are exhausted")]
fn submission_refused(world: &TimeTrackingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result"))?;
    if !matches!(
        result,
        Err(TicketLifecycleError::SupportBudgetExhausted { .. })
    ) {
        return Err(eyre::eyre!(
            "expected support budget refusal, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the client has {count:usize} ticket")]
fn client_ticket_count(world: &TimeTrackingWorld, count: usize) -> Result<(), eyre::Report> {
    let tickets = run_async(world.service.list_for_client(world.client))?;
    if tickets.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tickets for the client, found {}",
            tickets.len()
        ));
    }
    Ok(())
}
