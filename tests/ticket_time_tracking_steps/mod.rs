//! Step definitions for ticket time tracking scenarios.

pub mod world;

mod given;
mod then;
mod when;
