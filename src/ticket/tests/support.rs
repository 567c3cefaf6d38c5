//! Shared fixtures for ticket unit tests.

use crate::ticket::domain::{
    ClientId, NewTicket, ProjectId, Ticket, TicketDescription, TicketPriority, TicketStatus,
    TicketTitle, apply_status_transition,
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that only moves when told to.
#[derive(Debug)]
pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now += delta;
    }

    pub(super) fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now = instant;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock should not be poisoned")
    }
}

/// Monday morning, 2026-03-02T09:00:00Z.
pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("fixed timestamp should be valid")
}

pub(super) fn seconds(value: i64) -> TimeDelta {
    TimeDelta::seconds(value)
}

pub(super) fn new_ticket_for(project_id: ProjectId) -> NewTicket {
    NewTicket {
        client_id: ClientId::new(),
        project_id,
        title: TicketTitle::new("Printer offline").expect("valid title"),
        description: TicketDescription::new("The office printer stopped responding.")
            .expect("valid description"),
        priority: TicketPriority::Medium,
    }
}

/// An open ticket submitted at [`t0`].
pub(super) fn open_ticket() -> Ticket {
    Ticket::submit(new_ticket_for(ProjectId::new()), &ManualClock::starting_at(t0()))
}

/// A ticket moved into `status` at [`t0`].
pub(super) fn ticket_in(status: TicketStatus) -> Ticket {
    let ticket = open_ticket();
    apply_status_transition(&ticket, status, t0(), None)
        .expect("transition from open should succeed")
        .ticket
}
