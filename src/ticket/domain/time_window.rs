//! Half-open reporting windows over time log flush times.

use super::TicketDomainError;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` used to filter time logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window. An empty window (`start == end`) is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvertedTimeWindow`] when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TicketDomainError> {
        if start > end {
            return Err(TicketDomainError::InvertedTimeWindow);
        }
        Ok(Self { start, end })
    }

    /// Returns the UTC calendar month `year-month`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidCalendarMonth`] when the month is
    /// outside 1-12 or the year is out of range.
    pub fn calendar_month(year: i32, month: u32) -> Result<Self, TicketDomainError> {
        let invalid = || TicketDomainError::InvalidCalendarMonth { year, month };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = first.checked_add_months(Months::new(1)).ok_or_else(invalid)?;
        let start = first.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();
        let end = next.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();
        Ok(Self { start, end })
    }

    /// Returns the UTC calendar month containing `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidCalendarMonth`] at the edge of the
    /// representable calendar.
    pub fn month_containing(instant: DateTime<Utc>) -> Result<Self, TicketDomainError> {
        Self::calendar_month(instant.year(), instant.month())
    }

    /// Returns the inclusive start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
