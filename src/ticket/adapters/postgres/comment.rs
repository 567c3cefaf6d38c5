//! `PostgreSQL` comment threads.

use super::{
    blocking::{PersistenceFailure, TicketPgPool, with_connection},
    models::CommentRow,
    schema::comments,
};
use crate::ticket::{
    domain::{
        ClientId, CommentContent, CommentId, PersistedCommentData, TicketComment, TicketId, UserId,
    },
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed comment store.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: TicketPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TicketPgPool) -> Self {
        Self { pool }
    }
}

impl PersistenceFailure for CommentRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn append(&self, comment: &TicketComment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_row(comment);

        with_connection(&self.pool, move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CommentRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => CommentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> CommentRepositoryResult<Vec<TicketComment>> {
        with_connection(&self.pool, move |connection| {
            let rows = comments::table
                .filter(comments::ticket_id.eq(ticket_id.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

fn to_row(comment: &TicketComment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        ticket_id: comment.ticket_id().into_inner(),
        user_id: comment.author().staff().map(UserId::into_inner),
        client_id: comment.author().client().map(ClientId::into_inner),
        content: comment.content().as_str().to_owned(),
        created_at: comment.created_at(),
    }
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<TicketComment> {
    TicketComment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        ticket_id: TicketId::from_uuid(row.ticket_id),
        user_id: row.user_id.map(UserId::from_uuid),
        client_id: row.client_id.map(ClientId::from_uuid),
        content: CommentContent::new(row.content).map_err(CommentRepositoryError::persistence)?,
        created_at: row.created_at,
    })
    .map_err(CommentRepositoryError::persistence)
}
