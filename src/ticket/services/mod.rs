//! Application services for ticket lifecycle and time accounting.

mod activity;
mod comment;
mod desk;
mod lifecycle;
mod notification;
mod reporting;

pub use activity::ActivityRecorder;
pub use comment::{TicketCommentError, TicketCommentResult, TicketCommentService};
pub use desk::SupportDesk;
pub use lifecycle::{
    LifecyclePolicy, SubmitTicketRequest, SubmittedTicket, TicketLifecycleError,
    TicketLifecycleResult, TicketLifecycleService, TicketUpdateOutcome, UpdateTicketRequest,
};
pub use notification::{ClientContact, NotificationError, NotificationSettings, TicketNotifier};
pub use reporting::{ProjectTimeSummary, TimeReportError, TimeReportService};
