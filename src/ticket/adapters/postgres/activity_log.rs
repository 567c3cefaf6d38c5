//! `PostgreSQL` activity trail.

use super::{
    blocking::{PersistenceFailure, TicketPgPool, with_connection},
    models::ActivityLogRow,
    schema::activity_logs,
};
use crate::ticket::{
    domain::{ActivityLog, ActivityLogId, PersistedActivityLogData, TicketId, UserId},
    ports::{ActivityLogError, ActivityLogRepository, ActivityLogResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed activity log.
#[derive(Debug, Clone)]
pub struct PostgresActivityLogRepository {
    pool: TicketPgPool,
}

impl PostgresActivityLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TicketPgPool) -> Self {
        Self { pool }
    }
}

impl PersistenceFailure for ActivityLogError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append(&self, entry: &ActivityLog) -> ActivityLogResult<()> {
        let entry_id = entry.id();
        let row = ActivityLogRow {
            id: entry.id().into_inner(),
            ticket_id: entry.ticket_id().into_inner(),
            user_id: entry.user_id().map(UserId::into_inner),
            description: entry.description().to_owned(),
            created_at: entry.created_at(),
        };

        with_connection(&self.pool, move |connection| {
            diesel::insert_into(activity_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ActivityLogError::DuplicateEntry(entry_id)
                    }
                    _ => ActivityLogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_ticket(&self, ticket_id: TicketId) -> ActivityLogResult<Vec<ActivityLog>> {
        with_connection(&self.pool, move |connection| {
            let rows = activity_logs::table
                .filter(activity_logs::ticket_id.eq(ticket_id.into_inner()))
                .order(activity_logs::created_at.asc())
                .select(ActivityLogRow::as_select())
                .load::<ActivityLogRow>(connection)
                .map_err(ActivityLogError::persistence)?;
            Ok(rows
                .into_iter()
                .map(|row| {
                    ActivityLog::from_persisted(PersistedActivityLogData {
                        id: ActivityLogId::from_uuid(row.id),
                        ticket_id: TicketId::from_uuid(row.ticket_id),
                        user_id: row.user_id.map(UserId::from_uuid),
                        description: row.description,
                        created_at: row.created_at,
                    })
                })
                .collect())
        })
        .await
    }
}
