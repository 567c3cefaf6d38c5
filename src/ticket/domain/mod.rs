//! Domain model for support tickets and support-time accounting.
//!
//! Everything here is free of I/O: time enters through explicit `now`
//! arguments or an injected [`mockable::Clock`], and persistence happens
//! behind the ports.

mod activity;
mod comment;
mod error;
mod ids;
mod labels;
mod project;
mod status;
mod ticket;
mod time_log;
mod time_window;
mod transition;

pub use activity::{ActivityLog, PersistedActivityLogData, TicketActivity};
pub use comment::{
    CommentAuthor, CommentContent, MIN_COMMENT_LENGTH, PersistedCommentData, TicketComment,
};
pub use error::{
    ParseLocaleError, ParseProjectStatusError, ParseTicketPriorityError, ParseTicketStatusError,
    TicketDomainError,
};
pub use ids::{ActivityLogId, ClientId, CommentId, ProjectId, TicketId, TimeLogId, UserId};
pub use labels::{Locale, format_duration};
pub use project::{
    MAX_PROJECT_NAME_LENGTH, PersistedProjectData, Project, ProjectName, ProjectStatus,
    SupportHourLimit,
};
pub use status::{TicketPriority, TicketStatus};
pub use ticket::{
    MAX_TITLE_LENGTH, NewTicket, PersistedTicketData, Ticket, TicketDescription, TicketTitle,
};
pub use time_log::{PersistedTimeLogData, TimeLog};
pub use time_window::TimeWindow;
pub use transition::{
    EditedTicket, StatusChange, StatusTransitionOutcome, TicketEdit, TimerStop,
    apply_status_transition,
};
