// crates/jira-bridge-cli/src/main.rs
// ============================================================================
// Module: Jira Bridge CLI Entry Point
// Description: Command dispatcher for interactive, one-shot, batch and server use.
// Purpose: Resolve configuration once and hand every call to the dispatcher.
// Dependencies: clap, jira-bridge-config, jira-bridge-mcp, thiserror, tokio.
// ============================================================================

//! ## Overview
//! The CLI resolves [`BridgeConfig`] from file, environment and flags, builds
//! one dispatcher, and runs the selected front end. Every front end renders
//! the same result envelope; a failed call yields a failing exit status.
//! Credentials are only required by commands that reach the backend.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use jira_bridge_cli::CommandError;
use jira_bridge_cli::OutputFormat;
use jira_bridge_cli::SessionStats;
use jira_bridge_cli::invalid_arguments;
use jira_bridge_cli::render;
use jira_bridge_cli::run_batch;
use jira_bridge_cli::run_repl;
use jira_bridge_config::BridgeConfig;
use jira_bridge_config::ConfigOverrides;
use jira_bridge_config::ServerTransport;
use jira_bridge_core::tool_definitions;
use jira_bridge_mcp::CallContext;
use jira_bridge_mcp::Dispatcher;
use jira_bridge_mcp::McpServer;
use jira_bridge_mcp::build_dispatcher;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::io::BufReader;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "jira-bridge", version, about = "Jira operations over a REPL, one-shot calls, batch scripts and MCP")]
struct Cli {
    /// Backend connection overrides.
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Start an interactive session (same as the `repl` subcommand).
    #[arg(short = 'i', long, global = true)]
    interactive: bool,
    /// Write per-call audit events to stderr when no audit sink is configured.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Configuration and credential overrides shared by all subcommands.
#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Config file path (defaults to `JIRA_BRIDGE_CONFIG` or ./jira-bridge.toml).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Jira host (or set `JIRA_HOST`).
    #[arg(long, value_name = "URL", global = true)]
    jira_host: Option<String>,
    /// Jira account email (or set `JIRA_EMAIL`).
    #[arg(long, value_name = "EMAIL", global = true)]
    jira_email: Option<String>,
    /// Jira API token (or set `JIRA_API_TOKEN`).
    #[arg(long, value_name = "TOKEN", global = true)]
    jira_token: Option<String>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive session.
    Repl(FormatArgs),
    /// Invoke one operation and print its result.
    Call(CallCommand),
    /// Run `<operation> [json]` lines from a file, or stdin when the path is `-`.
    Batch(BatchCommand),
    /// Serve the operations as MCP tools.
    Serve(ServeCommand),
    /// Print the MCP tool definitions.
    Tools,
}

/// Output format selection.
#[derive(Args, Debug)]
struct FormatArgs {
    /// Result shape.
    #[arg(long, value_enum, default_value_t = OutputFormat::Envelope)]
    format: OutputFormat,
}

/// Arguments for the `call` command.
#[derive(Args, Debug)]
struct CallCommand {
    /// Operation name, e.g. `get_issue`.
    operation: String,
    /// JSON object of arguments (defaults to `{}`).
    arguments: Option<String>,
    /// Output format.
    #[command(flatten)]
    format: FormatArgs,
}

/// Arguments for the `batch` command.
#[derive(Args, Debug)]
struct BatchCommand {
    /// Script path, or `-` for stdin.
    path: String,
    /// Output format.
    #[command(flatten)]
    format: FormatArgs,
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Transport override.
    #[arg(long, value_enum)]
    transport: Option<TransportArg>,
    /// HTTP bind address override.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Transport names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransportArg {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP.
    Http,
}

impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let command = match cli.command {
        Some(command) => command,
        None if cli.interactive => Commands::Repl(FormatArgs {
            format: OutputFormat::Envelope,
        }),
        None => {
            show_help()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    match command {
        Commands::Tools => command_tools(),
        Commands::Repl(args) => {
            let dispatcher = dispatcher(&cli.connection, cli.verbose)?;
            command_repl(&dispatcher, args.format).await
        }
        Commands::Call(command) => {
            let dispatcher = dispatcher(&cli.connection, cli.verbose)?;
            command_call(&dispatcher, command).await
        }
        Commands::Batch(command) => {
            let dispatcher = dispatcher(&cli.connection, cli.verbose)?;
            command_batch(&dispatcher, command).await
        }
        Commands::Serve(command) => command_serve(&cli.connection, cli.verbose, command).await,
    }
}

/// Resolves configuration with optional server overrides.
fn resolve_config(
    connection: &ConnectionArgs,
    transport: Option<ServerTransport>,
    bind: Option<String>,
) -> CliResult<BridgeConfig> {
    let overrides = ConfigOverrides {
        config_path: connection.config.clone(),
        jira_host: connection.jira_host.clone(),
        jira_email: connection.jira_email.clone(),
        jira_token: connection.jira_token.clone(),
        transport,
        bind,
    };
    BridgeConfig::resolve(&overrides).map_err(|err| CliError::new(format!("configuration error: {err}")))
}

/// Builds the dispatcher for backend-facing commands.
fn dispatcher(connection: &ConnectionArgs, verbose: bool) -> CliResult<Dispatcher> {
    let config = resolve_config(connection, None, None)?;
    build_dispatcher(&config, verbose).map_err(|err| CliError::new(err.to_string()))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Prints the tool catalog as canonical JSON.
fn command_tools() -> CliResult<ExitCode> {
    let value = serde_json::to_value(tool_definitions())
        .map_err(|err| CliError::new(format!("failed to encode tools: {err}")))?;
    let text = serde_jcs::to_string(&value)
        .map_err(|err| CliError::new(format!("failed to encode tools: {err}")))?;
    write_stdout_line(&text)?;
    Ok(ExitCode::SUCCESS)
}

/// Runs an interactive session on stdin/stdout.
async fn command_repl(dispatcher: &Dispatcher, format: OutputFormat) -> CliResult<ExitCode> {
    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    run_repl(dispatcher, input, &mut output, format)
        .await
        .map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

/// Invokes a single operation.
async fn command_call(dispatcher: &Dispatcher, command: CallCommand) -> CliResult<ExitCode> {
    let parsed = match command.arguments.as_deref() {
        None => Ok(Value::Object(Map::new())),
        Some(text) => serde_json::from_str(text).map_err(|err| CommandError::InvalidJson(err.to_string())),
    };
    let envelope = match parsed {
        Ok(arguments) => dispatcher.dispatch(&CallContext::new("cli"), &command.operation, &arguments).await,
        Err(err) => invalid_arguments(&err, None),
    };
    let text = render(&envelope, command.format.format).map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&text)?;
    Ok(if envelope.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Runs a batch script from a file or stdin.
async fn command_batch(dispatcher: &Dispatcher, command: BatchCommand) -> CliResult<ExitCode> {
    let format = command.format.format;
    let stats = if command.path == "-" {
        batch_from(dispatcher, BufReader::new(tokio::io::stdin()), format).await?
    } else {
        let file = tokio::fs::File::open(&command.path)
            .await
            .map_err(|err| CliError::new(format!("failed to open {}: {err}", command.path)))?;
        batch_from(dispatcher, BufReader::new(file), format).await?
    };
    Ok(if stats.all_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Runs a batch session over `input`, writing to stdout.
async fn batch_from<R>(dispatcher: &Dispatcher, input: R, format: OutputFormat) -> CliResult<SessionStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut output = std::io::stdout();
    run_batch(dispatcher, input, &mut output, format).await.map_err(|err| CliError::new(err.to_string()))
}

/// Starts the MCP server.
async fn command_serve(connection: &ConnectionArgs, verbose: bool, command: ServeCommand) -> CliResult<ExitCode> {
    let config = resolve_config(connection, command.transport.map(ServerTransport::from), command.bind)?;
    let server = McpServer::from_config(&config, verbose).map_err(|err| CliError::new(err.to_string()))?;
    if verbose {
        write_stderr_line(&format!("jira-bridge serving MCP over {}", config.server.transport.as_str()))?;
    }
    server.serve().await.map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("")
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> CliResult<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}").map_err(|err| CliError::new(output_error("stderr", &err)))
}

/// Formats an output failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Reports an error on stderr and returns a failing exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "error: {message}");
    ExitCode::FAILURE
}
