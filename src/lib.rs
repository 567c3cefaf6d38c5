//! Ticketdesk: support ticket lifecycle and support-time accounting.
//!
//! Clients submit tickets against a project; support staff assign them and
//! move them through their statuses. Time spent working a ticket is measured
//! automatically and checked against the project's contracted support hours.
//!
//! # Architecture
//!
//! Ticketdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, memory)
//!
//! # Modules
//!
//! - [`ticket`]: Ticket lifecycle, time logs, activity trail and reports
//! - [`config`]: Desk configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod telemetry;
pub mod ticket;
