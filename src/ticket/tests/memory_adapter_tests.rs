//! Unit tests for the in-memory ticket and time log repository.

use super::support::{ManualClock, new_ticket_for, seconds, t0};
use crate::ticket::{
    adapters::memory::InMemoryTicketRepository,
    domain::{EditedTicket, ProjectId, Ticket, TicketEdit, TicketStatus, TimeLog, TimeWindow},
    ports::{TicketCommit, TicketRepository, TicketRepositoryError, TimeLogRepository},
};
use eyre::{Result, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTicketRepository {
    InMemoryTicketRepository::new()
}

fn submitted(project_id: ProjectId) -> Ticket {
    Ticket::submit(new_ticket_for(project_id), &ManualClock::starting_at(t0()))
}

fn edit(ticket: &Ticket, status: TicketStatus, offset_seconds: i64) -> Result<EditedTicket> {
    TicketEdit::new()
        .with_status(status)
        .apply(ticket, t0() + seconds(offset_seconds), None)?
        .ok_or_else(|| eyre::eyre!("status change should be committed"))
}

fn start_work(ticket: &Ticket) -> Result<TicketCommit> {
    Ok(TicketCommit::from(&edit(ticket, TicketStatus::InProgress, 0)?))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(repository: InMemoryTicketRepository) -> Result<()> {
    let ticket = submitted(ProjectId::new());
    repository.store(&ticket).await?;

    let duplicate = repository.store(&ticket).await;

    ensure!(matches!(duplicate, Err(TicketRepositoryError::DuplicateTicket(id)) if id == ticket.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_with_stale_revision_is_rejected(
    repository: InMemoryTicketRepository,
) -> Result<()> {
    let ticket = submitted(ProjectId::new());
    repository.store(&ticket).await?;
    let commit = start_work(&ticket)?;
    repository.commit(&commit).await?;

    let replay = repository.commit(&commit).await;

    ensure!(matches!(
        replay,
        Err(TicketRepositoryError::RevisionConflict {
            expected: 0,
            actual: 1,
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_of_unknown_ticket_is_not_found(repository: InMemoryTicketRepository) -> Result<()> {
    let ticket = submitted(ProjectId::new());
    let commit = start_work(&ticket)?;

    let result = repository.commit(&commit).await;

    ensure!(matches!(result, Err(TicketRepositoryError::NotFound(id)) if id == ticket.id()));
    ensure!(repository.list_for_ticket(ticket.id()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_total_respects_window_and_project(
    repository: InMemoryTicketRepository,
) -> Result<()> {
    let project_id = ProjectId::new();
    let ours = submitted(project_id);
    let theirs = submitted(ProjectId::new());
    repository.store(&ours).await?;
    repository.store(&theirs).await?;

    let mut stored = ours.clone();
    for (offset, spent) in [(0_i64, 600_i64), (86_400 * 40, 900)] {
        let started = edit(&stored, TicketStatus::InProgress, offset)?;
        repository.commit(&TicketCommit::from(&started)).await?;
        let stopped = edit(&started.ticket, TicketStatus::Pending, offset + spent)?;
        repository.commit(&TicketCommit::from(&stopped)).await?;
        stored = stopped.ticket;
    }
    repository
        .commit(&TicketCommit {
            ticket: theirs.clone(),
            expected_revision: theirs.revision(),
            time_log: Some(TimeLog::record(theirs.id(), None, 5_000, t0())),
        })
        .await?;

    let all_time = repository.total_seconds_for_project(project_id, None).await?;
    let march = repository
        .total_seconds_for_project(project_id, Some(TimeWindow::month_containing(t0())?))
        .await?;
    let empty = repository
        .total_seconds_for_project(ProjectId::new(), None)
        .await?;

    ensure!(all_time == 1_500, "got {all_time}");
    ensure!(march == 600, "got {march}");
    ensure!(empty == 0);
    ensure!(repository.list_for_ticket(ours.id()).await?.len() == 2);
    Ok(())
}
