//! Diesel row models for ticket persistence.

use super::schema::{activity_logs, comments, projects, tickets, time_logs};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for tickets.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TicketRow {
    /// Ticket identifier.
    pub id: uuid::Uuid,
    /// Submitting client.
    pub client_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assigned support user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Accumulated support time in seconds.
    pub time_spent_seconds: i64,
    /// Start of the running in-progress interval.
    pub in_progress_started_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tickets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicketRow {
    /// Ticket identifier.
    pub id: uuid::Uuid,
    /// Submitting client.
    pub client_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assigned support user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Accumulated support time in seconds.
    pub time_spent_seconds: i64,
    /// Start of the running in-progress interval.
    pub in_progress_started_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable ticket columns written by a commit.
///
/// `None` writes SQL `NULL` so that stopping the timer clears
/// `in_progress_started_at`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tickets, treat_none_as_null = true)]
pub struct TicketChangeset {
    /// Assigned support user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Accumulated support time in seconds.
    pub time_spent_seconds: i64,
    /// Start of the running in-progress interval.
    pub in_progress_started_at: Option<DateTime<Utc>>,
    /// New revision.
    pub revision: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Time log row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = time_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimeLogRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Owning ticket.
    pub ticket_id: uuid::Uuid,
    /// Credited user.
    pub user_id: Option<uuid::Uuid>,
    /// Interval length in seconds.
    pub seconds_spent: i64,
    /// Flush timestamp.
    pub created_at: DateTime<Utc>,
}

/// Aggregate row for project time totals.
#[derive(Debug, Clone, QueryableByName)]
pub struct ProjectSecondsRow {
    /// Summed seconds.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_seconds: i64,
}

/// Project row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Project status.
    pub status: String,
    /// Optional support-hour limit in seconds.
    pub support_limit_seconds: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Activity log row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = activity_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Described ticket.
    pub ticket_id: uuid::Uuid,
    /// Acting user.
    pub user_id: Option<uuid::Uuid>,
    /// Rendered description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Comment row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning ticket.
    pub ticket_id: uuid::Uuid,
    /// Staff author.
    pub user_id: Option<uuid::Uuid>,
    /// Client author.
    pub client_id: Option<uuid::Uuid>,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
