// crates/jira-bridge-cli/src/lib.rs
// ============================================================================
// Module: Jira Bridge CLI Library
// Description: Shared helpers for the Jira Bridge command-line interface.
// Purpose: Provide line parsing, rendering and session drivers for the binary.
// Dependencies: jira-bridge-mcp, jira-bridge-core, clap, serde_jcs, tokio
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) owns argument parsing and startup;
//! this library holds everything that runs once a dispatcher exists: parsing
//! interactive and batch lines, rendering envelopes, and the two session
//! drivers. Keeping them here lets the unit tests drive full sessions over
//! in-memory buffers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod command;
pub mod render;
pub mod session;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use command::CallLine;
pub use command::CommandError;
pub use command::ReplCommand;
pub use command::parse_batch_line;
pub use command::parse_repl_line;
pub use render::OutputFormat;
pub use render::RenderError;
pub use render::render;
pub use session::SessionError;
pub use session::SessionStats;
pub use session::invalid_arguments;
pub use session::run_batch;
pub use session::run_repl;
