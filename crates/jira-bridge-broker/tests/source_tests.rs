// crates/jira-bridge-broker/tests/source_tests.rs
// ============================================================================
// Module: Source Tests Entry Point
// Description: Entry point for nested source test modules.
// Purpose: Wire source test modules.
// Dependencies: jira-bridge-broker
// ============================================================================

//! ## Overview
//! Aggregates source-focused test modules for the broker crate.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

#[path = "sources/file_tests.rs"]
mod file_tests;

#[path = "sources/inline_tests.rs"]
mod inline_tests;
