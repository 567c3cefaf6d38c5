//! In-memory comment threads.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::ticket::{
    domain::{TicketComment, TicketId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};

/// Thread-safe in-memory comment store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<TicketComment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty comment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn append(&self, comment: &TicketComment) -> CommentRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        if comments.iter().any(|existing| existing.id() == comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        comments.push(comment.clone());
        Ok(())
    }

    async fn list_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> CommentRepositoryResult<Vec<TicketComment>> {
        let comments = self.comments.read().map_err(lock_error)?;
        let mut thread: Vec<TicketComment> = comments
            .iter()
            .filter(|comment| comment.ticket_id() == ticket_id)
            .cloned()
            .collect();
        thread.sort_by_key(TicketComment::created_at);
        Ok(thread)
    }
}
