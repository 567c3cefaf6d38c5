//! Diesel schema for ticket persistence.

diesel::table! {
    /// Client projects and their support-hour budgets.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Project status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional support-hour limit in seconds.
        support_limit_seconds -> Nullable<Int8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Support tickets with their time accounting fields.
    tickets (id) {
        /// Ticket identifier.
        id -> Uuid,
        /// Submitting client.
        client_id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Assigned support user.
        assignee_id -> Nullable<Uuid>,
        /// Ticket title.
        #[max_length = 255]
        title -> Varchar,
        /// Ticket description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Accumulated support time in seconds.
        time_spent_seconds -> Int8,
        /// Start of the running in-progress interval.
        in_progress_started_at -> Nullable<Timestamptz>,
        /// Optimistic-concurrency revision.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only in-progress intervals.
    time_logs (id) {
        /// Row identifier.
        id -> Uuid,
        /// Owning ticket.
        ticket_id -> Uuid,
        /// Credited user.
        user_id -> Nullable<Uuid>,
        /// Interval length in seconds.
        seconds_spent -> Int8,
        /// Flush timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ticket activity trail.
    activity_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Described ticket.
        ticket_id -> Uuid,
        /// Acting user.
        user_id -> Nullable<Uuid>,
        /// Rendered description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ticket comment threads.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning ticket.
        ticket_id -> Uuid,
        /// Staff author.
        user_id -> Nullable<Uuid>,
        /// Client author.
        client_id -> Nullable<Uuid>,
        /// Comment body.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
