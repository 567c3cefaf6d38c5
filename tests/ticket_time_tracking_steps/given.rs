//! Given steps for ticket time tracking BDD scenarios.

use super::world::{TimeTrackingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use ticketdesk::ticket::{
    domain::{Project, ProjectName, SupportHourLimit},
    ports::ProjectRepository,
    services::SubmitTicketRequest,
};

#[given(r#"a project "{name}" with a support limit of {hours:u32} hours"#)]
fn project_with_limit(
    world: &mut TimeTrackingWorld,
    name: String,
    hours: u32,
) -> Result<(), eyre::Report> {
    let project = Project::new(ProjectName::new(name)?, &*world.clock)
        .with_support_limit(SupportHourLimit::from_hours(hours));
    run_async(world.projects.store(&project)).wrap_err("store scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a client ticket titled "{title}""#)]
fn client_ticket(world: &mut TimeTrackingWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let submitted = run_async(world.service.submit_ticket(SubmitTicketRequest::new(
        world.client,
        project_id,
        title,
        "Reported through the client portal.",
    )))
    .wrap_err("submit scenario ticket")?;
    world.ticket = Some(submitted.ticket);
    Ok(())
}
