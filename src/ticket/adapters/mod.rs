//! Adapter implementations for ticket ports.

pub mod memory;
pub mod postgres;
