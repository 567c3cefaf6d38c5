//! Unit tests for the ticket module.

mod memory_adapter_tests;
mod support;
