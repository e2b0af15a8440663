// crates/jira-bridge-mcp/src/lib.rs
// ============================================================================
// Module: Jira Bridge MCP
// Description: Command dispatch core and MCP protocol server.
// Purpose: Route named operations to the backend and serve them as MCP tools.
// Dependencies: jira-bridge-core, jira-bridge-client, jira-bridge-broker, axum, tokio
// ============================================================================

//! ## Overview
//! Every invocation path ends in [`Dispatcher::dispatch`], which validates the
//! argument bag, drives the [`BackendAdapter`], and returns a
//! [`jira_bridge_core::ResultEnvelope`]. Failures of any layer are turned into
//! user-facing errors by [`normalize::normalize`] alone.
//!
//! ## Layer Responsibilities
//! - [`adapter`]: one method per operation; backend failures become tagged errors.
//! - [`normalize`]: the single error taxonomy boundary.
//! - [`dispatcher`]: the per-call state machine and audit emission.
//! - [`server`]: JSON-RPC 2.0 over stdio and HTTP.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapter;
pub mod audit;
pub mod dispatcher;
pub mod normalize;
pub mod server;

#[cfg(test)]
mod tests {
    //! Test-only lint relaxations for panic-based assertions and debug output.
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
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::AdapterError;
pub use adapter::BackendAdapter;
pub use adapter::MAX_SEARCH_RESULTS;
pub use adapter::OperationOutput;
pub use audit::DispatchAuditEvent;
pub use audit::DispatchAuditEventParams;
pub use audit::DispatchAuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::audit_sink_from_config;
pub use dispatcher::CallContext;
pub use dispatcher::DispatchError;
pub use dispatcher::DispatchOutcome;
pub use dispatcher::DispatchStage;
pub use dispatcher::Dispatcher;
pub use normalize::normalize;
pub use server::Framing;
pub use server::JsonRpcRequest;
pub use server::JsonRpcResponse;
pub use server::McpServer;
pub use server::McpServerError;
pub use server::RequestHandler;
pub use server::build_dispatcher;
pub use server::http_router;
pub use server::read_message;
pub use server::serve_stream;
pub use server::write_message;
