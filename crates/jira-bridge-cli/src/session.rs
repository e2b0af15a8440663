// crates/jira-bridge-cli/src/session.rs
// ============================================================================
// Module: Sessions
// Description: Interactive and batch drivers over the dispatcher.
// Purpose: Feed parsed lines to the dispatcher and render each envelope.
// Dependencies: jira-bridge-mcp, jira-bridge-core, tokio
// ============================================================================

//! ## Overview
//! Both drivers read lines from an async reader and write rendered results to
//! a writer, so the binary wires them to stdin/stdout and tests wire them to
//! in-memory buffers. Every call goes through [`Dispatcher::dispatch`]; no
//! state is carried between calls beyond the counters in [`SessionStats`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use jira_bridge_core::ErrorBody;
use jira_bridge_core::ErrorKind;
use jira_bridge_core::ResultEnvelope;
use jira_bridge_core::operations;
use jira_bridge_mcp::CallContext;
use jira_bridge_mcp::Dispatcher;
use serde_json::json;
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;

use crate::command::CallLine;
use crate::command::CommandError;
use crate::command::REPL_HELP;
use crate::command::ReplCommand;
use crate::command::parse_batch_line;
use crate::command::parse_repl_line;
use crate::render::OutputFormat;
use crate::render::RenderError;
use crate::render::render;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Prompt shown before each interactive line.
pub const PROMPT: &str = "jira> ";

/// Call counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Operations dispatched (including malformed batch lines).
    pub calls: usize,
    /// Calls that produced an error envelope.
    pub failures: usize,
}

impl SessionStats {
    /// Returns true when no call failed.
    #[must_use]
    pub const fn all_ok(&self) -> bool {
        self.failures == 0
    }

    /// Records one envelope.
    const fn record(&mut self, ok: bool) {
        self.calls += 1;
        if !ok {
            self.failures += 1;
        }
    }
}

/// Session driver failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("session io failed: {0}")]
    Io(#[from] std::io::Error),
    /// Result rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

// ============================================================================
// SECTION: Interactive
// ============================================================================

/// Runs an interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns [`SessionError`] when input or output fails.
pub async fn run_repl<R, W>(
    dispatcher: &Dispatcher,
    mut input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<SessionStats, SessionError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut stats = SessionStats::default();
    writeln!(output, "Jira Bridge interactive session")?;
    writeln!(output, "Type 'help' for commands, 'quit' to exit")?;
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            writeln!(output)?;
            break;
        }
        match parse_repl_line(&line) {
            Ok(ReplCommand::Empty) => {}
            Ok(ReplCommand::Quit) => {
                writeln!(output, "Goodbye!")?;
                break;
            }
            Ok(ReplCommand::Help) => writeln!(output, "{REPL_HELP}")?,
            Ok(ReplCommand::List) => write_operation_list(output)?,
            Ok(ReplCommand::Call(call)) => {
                let context = CallContext::new("repl");
                let envelope = dispatcher.dispatch(&context, &call.operation, &call.arguments).await;
                stats.record(envelope.is_ok());
                writeln!(output, "{}", render(&envelope, format)?)?;
            }
            Err(err) => writeln!(output, "error: {err}")?,
        }
    }
    Ok(stats)
}

/// Writes the operation catalog, one per line.
fn write_operation_list<W: Write>(output: &mut W) -> std::io::Result<()> {
    let catalog = operations();
    writeln!(output, "Available operations ({}):", catalog.len())?;
    for operation in catalog {
        writeln!(output, "  {:<28} {}", operation.name.as_str(), operation.description)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Batch
// ============================================================================

/// Builds the `InvalidParameterType` envelope for unparseable argument text.
///
/// The detail names `arguments` and, for batch scripts, the source line.
#[must_use]
pub fn invalid_arguments(error: &CommandError, line: Option<usize>) -> ResultEnvelope {
    let mut detail = json!({"parameter": "arguments"});
    if let Some(line) = line {
        detail["line"] = json!(line);
    }
    ResultEnvelope::Err(ErrorBody::new(ErrorKind::InvalidParameterType, error.to_string()).with_detail(detail))
}

/// Runs every line of a batch script, writing one result line per call.
///
/// Lines that fail to parse still produce an `InvalidParameterType` envelope
/// naming `arguments`, so output lines stay aligned with calls.
///
/// # Errors
///
/// Returns [`SessionError`] when input or output fails.
pub async fn run_batch<R, W>(
    dispatcher: &Dispatcher,
    mut input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<SessionStats, SessionError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut stats = SessionStats::default();
    let mut line = String::new();
    let mut line_number = 0usize;
    loop {
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }
        line_number += 1;
        let envelope = match parse_batch_line(&line) {
            Ok(None) => continue,
            Ok(Some(CallLine {
                operation,
                arguments,
            })) => {
                let context = CallContext::new("batch").with_request_id(format!("line-{line_number}"));
                dispatcher.dispatch(&context, &operation, &arguments).await
            }
            Err(err) => invalid_arguments(&err, Some(line_number)),
        };
        stats.record(envelope.is_ok());
        writeln!(output, "{}", render(&envelope, format)?)?;
    }
    output.flush()?;
    Ok(stats)
}
