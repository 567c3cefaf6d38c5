//! Error types for ticket domain validation and parsing.

use super::{CommentId, TicketId, TicketStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain ticket values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketDomainError {
    /// The ticket title is empty after trimming.
    #[error("ticket title must not be empty")]
    EmptyTitle,

    /// The ticket title exceeds the stored column width.
    #[error("ticket title is {actual} characters long; the maximum is {max}")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },

    /// The ticket description is empty after trimming.
    #[error("ticket description must not be empty")]
    EmptyDescription,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the stored column width.
    #[error("project name is {actual} characters long; the maximum is {max}")]
    ProjectNameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected name in characters.
        actual: usize,
    },

    /// The comment is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,

    /// The comment is shorter than the minimum length.
    #[error("comment is {actual} characters long; at least {min} are required")]
    CommentTooShort {
        /// Minimum accepted length in characters.
        min: usize,
        /// Length of the rejected comment in characters.
        actual: usize,
    },

    /// A persisted comment names both or neither of a staff and client author.
    #[error("comment {0} must have exactly one author")]
    AmbiguousCommentAuthor(CommentId),

    /// A persisted ticket has a timer that disagrees with its status.
    #[error("ticket {ticket_id} has status {status} but timer running is {timer_running}")]
    InconsistentTimer {
        /// Ticket carrying the inconsistent row.
        ticket_id: TicketId,
        /// Persisted status.
        status: TicketStatus,
        /// Whether `in_progress_started_at` was set.
        timer_running: bool,
    },

    /// Adding an interval would overflow the time accumulator.
    #[error("time accumulator overflow on ticket {0}")]
    TimeAccumulatorOverflow(TicketId),

    /// The revision counter cannot be advanced any further.
    #[error("revision counter exhausted on ticket {0}")]
    RevisionOverflow(TicketId),

    /// A time window ends before it starts.
    #[error("time window start must not be after its end")]
    InvertedTimeWindow,

    /// A calendar month could not be resolved.
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidCalendarMonth {
        /// Requested year.
        year: i32,
        /// Requested month (1-12).
        month: u32,
    },
}

/// Error returned while parsing ticket statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ticket status: {0}")]
pub struct ParseTicketStatusError(pub String);

/// Error returned while parsing ticket priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ticket priority: {0}")]
pub struct ParseTicketPriorityError(pub String);

/// Error returned while parsing project statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing locale tags.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct ParseLocaleError(pub String);
