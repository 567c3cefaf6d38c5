//! Port contracts for ticket lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by ticket services.

pub mod activity_log;
pub mod comment;
pub mod mail;
pub mod project;
pub mod repository;
pub mod time_log;

pub use activity_log::{ActivityLogError, ActivityLogRepository, ActivityLogResult};
pub use comment::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
pub use mail::{MailError, MailTransport, OutgoingEmail};
pub use project::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use repository::{
    TicketCommit, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
};
pub use time_log::TimeLogRepository;
