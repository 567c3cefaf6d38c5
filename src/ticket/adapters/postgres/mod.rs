//! `PostgreSQL` adapters for ticket persistence.

mod activity_log;
mod blocking;
mod comment;
mod models;
mod project;
mod repository;
mod schema;

pub use activity_log::PostgresActivityLogRepository;
pub use blocking::TicketPgPool;
pub use comment::PostgresCommentRepository;
pub use project::PostgresProjectRepository;
pub use repository::PostgresTicketRepository;
