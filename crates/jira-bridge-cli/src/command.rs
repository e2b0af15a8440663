// crates/jira-bridge-cli/src/command.rs
// ============================================================================
// Module: Command Lines
// Description: Parsing for interactive session and batch script lines.
// Purpose: Turn a text line into an operation name plus argument bag.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interactive lines are `help`, `list`, `call <op> [json]` or one of
//! `quit`, `exit`, `q`. Batch lines drop the `call` keyword: `<op> [json]`.
//! The JSON argument bag is optional and defaults to an empty object; it is
//! parsed here but validated by the dispatcher.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// An operation invocation parsed from a line.
#[derive(Debug, Clone, PartialEq)]
pub struct CallLine {
    /// Operation name as typed.
    pub operation: String,
    /// Argument bag; an empty object when omitted.
    pub arguments: Value,
}

/// Interactive session commands.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Blank input.
    Empty,
    /// Show the command summary.
    Help,
    /// List available operations.
    List,
    /// End the session.
    Quit,
    /// Invoke an operation.
    Call(CallLine),
}

/// Line parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// `call` without an operation name.
    #[error("missing operation name")]
    MissingOperation,
    /// Argument text is not valid JSON.
    #[error("invalid json arguments: {0}")]
    InvalidJson(String),
    /// First word is not a known command.
    #[error("unknown command: {0}; type 'help' for available commands")]
    UnknownCommand(String),
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses one interactive session line.
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands, a bare `call`, or malformed
/// JSON arguments.
pub fn parse_repl_line(line: &str) -> Result<ReplCommand, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let (word, rest) = split_word(line);
    match word.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        "help" => Ok(ReplCommand::Help),
        "list" => Ok(ReplCommand::List),
        "call" => parse_call(rest).map(ReplCommand::Call),
        _ => Err(CommandError::UnknownCommand(word.to_string())),
    }
}

/// Parses one batch script line; comments and blank lines yield `None`.
///
/// # Errors
///
/// Returns [`CommandError::InvalidJson`] when the argument text is malformed.
pub fn parse_batch_line(line: &str) -> Result<Option<CallLine>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    parse_call(line).map(Some)
}

/// Parses `<op> [json]`.
fn parse_call(text: &str) -> Result<CallLine, CommandError> {
    let (operation, rest) = split_word(text.trim());
    if operation.is_empty() {
        return Err(CommandError::MissingOperation);
    }
    let arguments = if rest.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(rest).map_err(|err| CommandError::InvalidJson(err.to_string()))?
    };
    Ok(CallLine {
        operation: operation.to_string(),
        arguments,
    })
}

/// Splits the first whitespace-delimited word from the remainder.
fn split_word(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace)
        .map_or((text, ""), |(word, rest)| (word, rest.trim()))
}

// ============================================================================
// SECTION: Help
// ============================================================================

/// Interactive session command summary.
pub const REPL_HELP: &str = "\
Commands:
  list                      List available operations
  call <operation> <json>   Invoke an operation with JSON arguments
  help                      Show this help
  quit                      Exit

Example:
  call get_issue {\"issueKey\": \"PROJ-123\"}";
