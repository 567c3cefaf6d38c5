//! Conversation thread attached to a ticket.

use super::{ClientId, CommentId, TicketDomainError, TicketId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Shortest accepted comment, in characters after trimming.
pub const MIN_COMMENT_LENGTH: usize = 3;

/// Trimmed comment body of at least [`MIN_COMMENT_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentContent(String);

impl CommentContent {
    /// Creates validated comment content.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyComment`] for blank input and
    /// [`TicketDomainError::CommentTooShort`] below the minimum length.
    pub fn new(value: impl Into<String>) -> Result<Self, TicketDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicketDomainError::EmptyComment);
        }
        let length = trimmed.chars().count();
        if length < MIN_COMMENT_LENGTH {
            return Err(TicketDomainError::CommentTooShort {
                min: MIN_COMMENT_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the comment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who wrote a comment: support staff or the submitting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum CommentAuthor {
    /// A support staff member.
    Staff(UserId),
    /// A portal client.
    Client(ClientId),
}

impl CommentAuthor {
    /// Returns the staff author, if any.
    #[must_use]
    pub const fn staff(self) -> Option<UserId> {
        match self {
            Self::Staff(user) => Some(user),
            Self::Client(_) => None,
        }
    }

    /// Returns the client author, if any.
    #[must_use]
    pub const fn client(self) -> Option<ClientId> {
        match self {
            Self::Client(client) => Some(client),
            Self::Staff(_) => None,
        }
    }
}

/// A message posted on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketComment {
    id: CommentId,
    ticket_id: TicketId,
    author: CommentAuthor,
    content: CommentContent,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
///
/// Storage keeps the author as two nullable columns; exactly one must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Ticket the comment belongs to.
    pub ticket_id: TicketId,
    /// Staff author, if any.
    pub user_id: Option<UserId>,
    /// Client author, if any.
    pub client_id: Option<ClientId>,
    /// Comment body.
    pub content: CommentContent,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TicketComment {
    /// Posts a new comment at the clock's current time.
    #[must_use]
    pub fn post(
        ticket_id: TicketId,
        author: CommentAuthor,
        content: CommentContent,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            ticket_id,
            author,
            content,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::AmbiguousCommentAuthor`] unless exactly
    /// one author column is set.
    pub fn from_persisted(data: PersistedCommentData) -> Result<Self, TicketDomainError> {
        let author = match (data.user_id, data.client_id) {
            (Some(user), None) => CommentAuthor::Staff(user),
            (None, Some(client)) => CommentAuthor::Client(client),
            _ => return Err(TicketDomainError::AmbiguousCommentAuthor(data.id)),
        };
        Ok(Self {
            id: data.id,
            ticket_id: data.ticket_id,
            author,
            content: data.content,
            created_at: data.created_at,
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the ticket the comment belongs to.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> CommentAuthor {
        self.author
    }

    /// Returns the comment body.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Returns when the comment was posted.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
