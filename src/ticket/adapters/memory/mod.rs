//! In-memory adapters for tests and embedded use.

mod activity_log;
mod comment;
mod mailbox;
mod project;
mod ticket;

pub use activity_log::InMemoryActivityLogRepository;
pub use comment::InMemoryCommentRepository;
pub use mailbox::InMemoryMailbox;
pub use project::InMemoryProjectRepository;
pub use ticket::InMemoryTicketRepository;
