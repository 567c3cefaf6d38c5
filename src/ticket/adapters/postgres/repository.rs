//! `PostgreSQL` repository implementation for tickets and time logs.

use super::{
    blocking::{PersistenceFailure, TicketPgPool, with_connection},
    models::{NewTicketRow, ProjectSecondsRow, TicketChangeset, TicketRow, TimeLogRow},
    schema::{tickets, time_logs},
};
use crate::ticket::{
    domain::{
        ClientId, PersistedTicketData, PersistedTimeLogData, ProjectId, Ticket, TicketDescription,
        TicketId, TicketPriority, TicketStatus, TicketTitle, TimeLog, TimeLogId, TimeWindow,
        UserId,
    },
    ports::{
        TicketCommit, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
        TimeLogRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed ticket and time log repository.
///
/// Commits run in one transaction: a revision-guarded `UPDATE` of the ticket
/// row followed by the time log `INSERT`. The guarded update takes the row
/// lock, so concurrent commits on one ticket serialize and the loser sees
/// zero updated rows.
#[derive(Debug, Clone)]
pub struct PostgresTicketRepository {
    pool: TicketPgPool,
}

impl PostgresTicketRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TicketPgPool) -> Self {
        Self { pool }
    }
}

impl PersistenceFailure for TicketRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for TicketRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn store(&self, ticket: &Ticket) -> TicketRepositoryResult<()> {
        let ticket_id = ticket.id();
        let new_row = to_new_row(ticket)?;

        with_connection(&self.pool, move |connection| {
            diesel::insert_into(tickets::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TicketRepositoryError::DuplicateTicket(ticket_id)
                    }
                    _ => TicketRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>> {
        with_connection(&self.pool, move |connection| {
            let row = tickets::table
                .filter(tickets::id.eq(id.into_inner()))
                .select(TicketRow::as_select())
                .first::<TicketRow>(connection)
                .optional()?;
            row.map(row_to_ticket).transpose()
        })
        .await
    }

    async fn find_by_client(&self, client_id: ClientId) -> TicketRepositoryResult<Vec<Ticket>> {
        with_connection(&self.pool, move |connection| {
            let rows = tickets::table
                .filter(tickets::client_id.eq(client_id.into_inner()))
                .order(tickets::updated_at.desc())
                .select(TicketRow::as_select())
                .load::<TicketRow>(connection)?;
            rows.into_iter().map(row_to_ticket).collect()
        })
        .await
    }

    async fn commit(&self, commit: &TicketCommit) -> TicketRepositoryResult<()> {
        let ticket_id = commit.ticket.id();
        let expected_revision = commit.expected_revision;
        let expected = to_db_integer(expected_revision)?;
        let changeset = to_changeset(&commit.ticket)?;
        let time_log_row = commit.time_log.as_ref().map(to_time_log_row).transpose()?;

        with_connection(&self.pool, move |connection| {
            connection.transaction::<_, TicketRepositoryError, _>(|tx| {
                let updated = diesel::update(
                    tickets::table
                        .filter(tickets::id.eq(ticket_id.into_inner()))
                        .filter(tickets::revision.eq(expected)),
                )
                .set(&changeset)
                .execute(tx)?;

                if updated == 0 {
                    return Err(conflict_or_missing(tx, ticket_id, expected_revision)?);
                }

                if let Some(row) = &time_log_row {
                    diesel::insert_into(time_logs::table)
                        .values(row)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }
}

#[async_trait]
impl TimeLogRepository for PostgresTicketRepository {
    async fn list_for_ticket(&self, ticket_id: TicketId) -> TicketRepositoryResult<Vec<TimeLog>> {
        with_connection(&self.pool, move |connection| {
            let rows = time_logs::table
                .filter(time_logs::ticket_id.eq(ticket_id.into_inner()))
                .order(time_logs::created_at.asc())
                .select(TimeLogRow::as_select())
                .load::<TimeLogRow>(connection)?;
            rows.into_iter().map(row_to_time_log).collect()
        })
        .await
    }

    async fn total_seconds_for_project(
        &self,
        project_id: ProjectId,
        window: Option<TimeWindow>,
    ) -> TicketRepositoryResult<u64> {
        let start = window.map(|range| range.start());
        let end = window.map(|range| range.end());

        with_connection(&self.pool, move |connection| {
            let row = diesel::sql_query(concat!(
                "SELECT COALESCE(SUM(tl.seconds_spent), 0)::BIGINT AS total_seconds ",
                "FROM time_logs tl ",
                "JOIN tickets t ON t.id = tl.ticket_id ",
                "WHERE t.project_id = $1 ",
                "AND ($2::TIMESTAMPTZ IS NULL OR tl.created_at >= $2) ",
                "AND ($3::TIMESTAMPTZ IS NULL OR tl.created_at < $3)",
            ))
            .bind::<diesel::sql_types::Uuid, _>(project_id.into_inner())
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>, _>(start)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>, _>(end)
            .get_result::<ProjectSecondsRow>(connection)?;
            from_db_integer(row.total_seconds)
        })
        .await
    }
}

/// Distinguishes a lost race from a missing ticket after a zero-row update.
fn conflict_or_missing(
    connection: &mut PgConnection,
    ticket_id: TicketId,
    expected: u64,
) -> TicketRepositoryResult<TicketRepositoryError> {
    let stored = tickets::table
        .filter(tickets::id.eq(ticket_id.into_inner()))
        .select(tickets::revision)
        .first::<i64>(connection)
        .optional()?;

    match stored {
        None => Ok(TicketRepositoryError::NotFound(ticket_id)),
        Some(actual) => Ok(TicketRepositoryError::RevisionConflict {
            ticket_id,
            expected,
            actual: from_db_integer(actual)?,
        }),
    }
}

fn to_db_integer(value: u64) -> TicketRepositoryResult<i64> {
    i64::try_from(value).map_err(TicketRepositoryError::persistence)
}

fn from_db_integer(value: i64) -> TicketRepositoryResult<u64> {
    u64::try_from(value).map_err(TicketRepositoryError::persistence)
}

fn to_new_row(ticket: &Ticket) -> TicketRepositoryResult<NewTicketRow> {
    Ok(NewTicketRow {
        id: ticket.id().into_inner(),
        client_id: ticket.client_id().into_inner(),
        project_id: ticket.project_id().into_inner(),
        assignee_id: ticket.assignee().map(UserId::into_inner),
        title: ticket.title().as_str().to_owned(),
        description: ticket.description().as_str().to_owned(),
        status: ticket.status().as_str().to_owned(),
        priority: ticket.priority().as_str().to_owned(),
        time_spent_seconds: to_db_integer(ticket.time_spent_seconds())?,
        in_progress_started_at: ticket.in_progress_started_at(),
        revision: to_db_integer(ticket.revision())?,
        created_at: ticket.created_at(),
        updated_at: ticket.updated_at(),
    })
}

fn to_changeset(ticket: &Ticket) -> TicketRepositoryResult<TicketChangeset> {
    Ok(TicketChangeset {
        assignee_id: ticket.assignee().map(UserId::into_inner),
        status: ticket.status().as_str().to_owned(),
        priority: ticket.priority().as_str().to_owned(),
        time_spent_seconds: to_db_integer(ticket.time_spent_seconds())?,
        in_progress_started_at: ticket.in_progress_started_at(),
        revision: to_db_integer(ticket.revision())?,
        updated_at: ticket.updated_at(),
    })
}

fn to_time_log_row(time_log: &TimeLog) -> TicketRepositoryResult<TimeLogRow> {
    Ok(TimeLogRow {
        id: time_log.id().into_inner(),
        ticket_id: time_log.ticket_id().into_inner(),
        user_id: time_log.user_id().map(UserId::into_inner),
        seconds_spent: to_db_integer(time_log.seconds_spent())?,
        created_at: time_log.created_at(),
    })
}

fn row_to_ticket(row: TicketRow) -> TicketRepositoryResult<Ticket> {
    let TicketRow {
        id,
        client_id,
        project_id,
        assignee_id,
        title,
        description,
        status,
        priority,
        time_spent_seconds,
        in_progress_started_at,
        revision,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTicketData {
        id: TicketId::from_uuid(id),
        client_id: ClientId::from_uuid(client_id),
        project_id: ProjectId::from_uuid(project_id),
        assignee: assignee_id.map(UserId::from_uuid),
        title: TicketTitle::new(title).map_err(TicketRepositoryError::persistence)?,
        description: TicketDescription::new(description)
            .map_err(TicketRepositoryError::persistence)?,
        status: TicketStatus::try_from(status.as_str())
            .map_err(TicketRepositoryError::persistence)?,
        priority: TicketPriority::try_from(priority.as_str())
            .map_err(TicketRepositoryError::persistence)?,
        time_spent_seconds: from_db_integer(time_spent_seconds)?,
        in_progress_started_at,
        revision: from_db_integer(revision)?,
        created_at,
        updated_at,
    };
    Ticket::from_persisted(data).map_err(TicketRepositoryError::persistence)
}

fn row_to_time_log(row: TimeLogRow) -> TicketRepositoryResult<TimeLog> {
    Ok(TimeLog::from_persisted(PersistedTimeLogData {
        id: TimeLogId::from_uuid(row.id),
        ticket_id: TicketId::from_uuid(row.ticket_id),
        user_id: row.user_id.map(UserId::from_uuid),
        seconds_spent: from_db_integer(row.seconds_spent)?,
        created_at: row.created_at,
    }))
}
