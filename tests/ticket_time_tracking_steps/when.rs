//! When steps for ticket time tracking BDD scenarios.

use super::world::{TimeTrackingWorld, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use ticketdesk::ticket::{
    domain::{TicketPriority, TicketStatus},
    services::{SubmitTicketRequest, UpdateTicketRequest},
};

fn parse_status(raw: &str) -> Result<TicketStatus, eyre::Report> {
    TicketStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

fn apply(world: &mut TimeTrackingWorld, request: UpdateTicketRequest) -> Result<(), eyre::Report> {
    let outcome = run_async(world.service.update_ticket(request)).wrap_err("update ticket")?;
    world.ticket = Some(outcome.ticket);
    Ok(())
}

#[when(r#"the ticket moves to "{status}""#)]
fn ticket_moves_to(world: &mut TimeTrackingWorld, status: String) -> Result<(), eyre::Report> {
    let request = UpdateTicketRequest::new(world.ticket()?.id()).with_status(parse_status(&status)?);
    apply(world, request)
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut TimeTrackingWorld, seconds: i64) {
    world.clock.advance(TimeDelta::seconds(seconds));
}

#[when(r#"the ticket is saved as "{status}" with priority "{priority}""#)]
fn ticket_saved_with_priority(
    world: &mut TimeTrackingWorld,
    status: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let parsed_priority = TicketPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let request = UpdateTicketRequest::new(world.ticket()?.id())
        .with_status(parse_status(&status)?)
        .with_priority(parsed_priority);
    apply(world, request)
}

#[when(r#"the client submits a ticket titled "{title}""#)]
fn client_submits(world: &mut TimeTrackingWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let result = run_async(world.service.submit_ticket(SubmitTicketRequest::new(
        world.client,
        project_id,
        title,
        "Another request from the portal.",
    )))
    .map(|submitted| submitted.ticket);
    world.last_submission = Some(result);
    Ok(())
}
