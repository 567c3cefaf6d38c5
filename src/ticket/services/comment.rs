//! Posting and reading ticket comment threads.

use crate::ticket::{
    domain::{CommentAuthor, CommentContent, TicketComment, TicketDomainError, TicketId},
    ports::{CommentRepository, CommentRepositoryError, TicketRepository, TicketRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for ticket comments.
#[derive(Debug, Error)]
pub enum TicketCommentError {
    /// Comment content failed validation.
    #[error(transparent)]
    Domain(#[from] TicketDomainError),
    /// Ticket lookup failed.
    #[error(transparent)]
    Ticket(#[from] TicketRepositoryError),
    /// Comment storage failed.
    #[error(transparent)]
    Comment(#[from] CommentRepositoryError),
    /// The ticket does not exist or is not visible to the author.
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),
}

impl TicketCommentError {
    /// Returns whether retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Ticket(err) => err.is_retryable(),
            Self::Comment(err) => err.is_retryable(),
            Self::Domain(_) | Self::TicketNotFound(_) => false,
        }
    }
}

/// Result type for comment operations.
pub type TicketCommentResult<T> = Result<T, TicketCommentError>;

/// Comment threads on tickets.
///
/// Staff may comment on any ticket. A client may only comment on tickets
/// they submitted; other tickets are reported as not found.
#[derive(Clone)]
pub struct TicketCommentService<T, M, C>
where
    T: TicketRepository,
    M: CommentRepository,
    C: Clock + Send + Sync,
{
    tickets: Arc<T>,
    comments: Arc<M>,
    clock: Arc<C>,
}

impl<T, M, C> TicketCommentService<T, M, C>
where
    T: TicketRepository,
    M: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a comment service.
    #[must_use]
    pub const fn new(tickets: Arc<T>, comments: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            tickets,
            comments,
            clock,
        }
    }

    /// Posts a comment on a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TicketCommentError::Domain`] for blank or too-short content,
    /// [`TicketCommentError::TicketNotFound`] when the ticket is missing or
    /// belongs to another client, and repository errors otherwise.
    pub async fn post_comment(
        &self,
        ticket_id: TicketId,
        author: CommentAuthor,
        content: impl Into<String> + Send,
    ) -> TicketCommentResult<TicketComment> {
        let body = CommentContent::new(content)?;
        let ticket = self
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or(TicketCommentError::TicketNotFound(ticket_id))?;

        if author
            .client()
            .is_some_and(|client| client != ticket.client_id())
        {
            warn!(ticket_id = %ticket_id, "client comment refused on a ticket they do not own");
            return Err(TicketCommentError::TicketNotFound(ticket_id));
        }

        let comment = TicketComment::post(ticket_id, author, body, &*self.clock);
        self.comments.append(&comment).await?;
        info!(
            ticket_id = %ticket_id,
            comment_id = %comment.id(),
            staff = author.staff().is_some(),
            "comment posted"
        );
        Ok(comment)
    }

    /// Returns a ticket's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TicketCommentError::Comment`] when lookup fails.
    pub async fn thread(&self, ticket_id: TicketId) -> TicketCommentResult<Vec<TicketComment>> {
        Ok(self.comments.list_for_ticket(ticket_id).await?)
    }
}
