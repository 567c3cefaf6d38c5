//! Support ticket lifecycle and time accounting.
//!
//! Tickets move between `open`, `pending`, `in_progress` and `closed`. Time
//! spent in `in_progress` is folded into the ticket's accumulator and
//! recorded as an append-only time log each time the ticket leaves that
//! status. Project time totals are computed from the time log, and a project
//! whose support-hour limit is used up stops accepting new tickets.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
