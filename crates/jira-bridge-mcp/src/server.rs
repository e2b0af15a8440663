// crates/jira-bridge-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: MCP server implementations for stdio and HTTP transports.
// Purpose: Expose the operation catalog as JSON-RPC 2.0 tools.
// Dependencies: jira-bridge-core, jira-bridge-config, axum, tokio, subtle
// ============================================================================

//! ## Overview
//! The MCP server exposes every registered operation as a tool and routes each
//! `tools/call` through [`Dispatcher::dispatch`]. Operation failures are not
//! JSON-RPC errors: they come back as a tool result whose `isError` flag is set
//! and whose content carries the failed envelope.
//!
//! Stdio accepts both newline-delimited JSON and `Content-Length` framing and
//! answers each message in the framing it arrived in. Every request runs as
//! its own task; responses are serialized through a single writer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use jira_bridge_broker::AttachmentCodec;
use jira_bridge_client::JiraClient;
use jira_bridge_client::JiraClientConfig;
use jira_bridge_config::BridgeConfig;
use jira_bridge_config::ServerConfig;
use jira_bridge_config::ServerTransport;
use jira_bridge_core::ToolDefinition;
use jira_bridge_core::tool_definitions;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use subtle::ConstantTimeEq;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::adapter::BackendAdapter;
use crate::audit::audit_sink_from_config;
use crate::dispatcher::CallContext;
use crate::dispatcher::Dispatcher;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Server name reported by `initialize`.
pub const SERVER_NAME: &str = "jira-bridge";

/// Protocol version reported when the client does not request one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds a dispatcher over the Jira REST client described by configuration.
///
/// # Errors
///
/// Returns [`McpServerError`] when credentials are missing or the client or
/// audit sink cannot be created.
pub fn build_dispatcher(config: &BridgeConfig, verbose: bool) -> Result<Dispatcher, McpServerError> {
    let credentials = config.credentials().map_err(|err| McpServerError::Config(err.to_string()))?;
    let client = JiraClient::new(JiraClientConfig {
        base_url: credentials.base_url,
        email: credentials.email,
        api_token: credentials.api_token,
        timeout: credentials.timeout,
    })
    .map_err(|err| McpServerError::Init(err.to_string()))?;
    let audit = audit_sink_from_config(&config.audit, verbose)
        .map_err(|err| McpServerError::Init(format!("audit sink: {err}")))?;
    let codec = AttachmentCodec::new(config.attachments.root_path());
    Ok(Dispatcher::new(BackendAdapter::new(Arc::new(client), codec)).with_audit(audit))
}

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Server settings.
    config: ServerConfig,
    /// Request handler shared by all transports.
    handler: RequestHandler,
}

impl McpServer {
    /// Creates a server over an existing dispatcher.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher, config: ServerConfig) -> Self {
        Self {
            config,
            handler: RequestHandler::new(dispatcher),
        }
    }

    /// Builds a server from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when initialization fails.
    pub fn from_config(config: &BridgeConfig, verbose: bool) -> Result<Self, McpServerError> {
        let dispatcher = build_dispatcher(config, verbose)?;
        Ok(Self::new(dispatcher, config.server.clone()))
    }

    /// Serves requests using the configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the server fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        match self.config.transport {
            ServerTransport::Stdio => serve_stdio(self.handler, self.config.max_body_bytes).await,
            ServerTransport::Http => serve_http(self.config, self.handler).await,
        }
    }
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Serves JSON-RPC requests over stdin/stdout until stdin closes.
async fn serve_stdio(handler: RequestHandler, max_body_bytes: usize) -> Result<(), McpServerError> {
    serve_stream(handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout(), max_body_bytes).await
}

/// Serves framed JSON-RPC messages from `reader` until it reaches EOF.
///
/// Each message is handled on its own task, so a slow call does not hold back
/// later ones; responses are written to `writer` in completion order.
///
/// # Errors
///
/// Returns [`McpServerError::Transport`] when reading or writing fails.
pub async fn serve_stream<R, W>(
    handler: RequestHandler,
    mut reader: R,
    mut writer: W,
    max_body_bytes: usize,
) -> Result<(), McpServerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (sender, mut receiver) = mpsc::unbounded_channel::<(Framing, Vec<u8>)>();
    let writer_task = tokio::spawn(async move {
        while let Some((framing, payload)) = receiver.recv().await {
            write_message(&mut writer, framing, &payload).await?;
        }
        Ok::<(), McpServerError>(())
    });

    let handler = Arc::new(handler);
    while let Some((framing, bytes)) = read_message(&mut reader, max_body_bytes).await? {
        let handler = Arc::clone(&handler);
        let sender = sender.clone();
        tokio::spawn(async move {
            let response = match serde_json::from_slice::<JsonRpcRequest>(&bytes) {
                Ok(request) => handler.handle(request, "stdio").await,
                Err(_) => Some(invalid_request()),
            };
            if let Some((_, response)) = response
                && let Ok(payload) = serde_json::to_vec(&response)
            {
                let _ = sender.send((framing, payload));
            }
        });
    }
    drop(sender);
    writer_task.await.map_err(|_| McpServerError::Transport("stdio writer failed".to_string()))?
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Serves JSON-RPC requests over HTTP.
async fn serve_http(config: ServerConfig, handler: RequestHandler) -> Result<(), McpServerError> {
    let addr: SocketAddr = config.bind_addr().map_err(|err| McpServerError::Config(err.to_string()))?;
    let app = http_router(handler, &config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| McpServerError::Transport("http bind failed".to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|_| McpServerError::Transport("http server failed".to_string()))
}

/// Builds the HTTP router serving `POST /rpc`.
pub fn http_router(handler: RequestHandler, config: &ServerConfig) -> Router {
    let state = Arc::new(ServerState {
        handler,
        max_body_bytes: config.max_body_bytes,
        bearer_token: config.bearer_token.clone(),
    });
    Router::new()
        .route("/rpc", post(handle_http))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state)
}

/// Shared server state for HTTP handlers.
struct ServerState {
    /// Request handler.
    handler: RequestHandler,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// Bearer token required on requests, when configured.
    bearer_token: Option<String>,
}

/// Handles HTTP JSON-RPC requests.
async fn handle_http(State(state): State<Arc<ServerState>>, headers: HeaderMap, bytes: Bytes) -> Response {
    if let Some(expected) = state.bearer_token.as_deref()
        && !bearer_matches(&headers, expected)
    {
        let response = error_response(Value::Null, -32001, "unauthenticated");
        return (StatusCode::UNAUTHORIZED, axum::Json(response)).into_response();
    }
    if bytes.len() > state.max_body_bytes {
        let response = error_response(Value::Null, -32070, "request body too large");
        return (StatusCode::PAYLOAD_TOO_LARGE, axum::Json(response)).into_response();
    }
    let handled = match serde_json::from_slice::<JsonRpcRequest>(bytes.as_ref()) {
        Ok(request) => state.handler.handle(request, "http").await,
        Err(_) => Some(invalid_request()),
    };
    match handled {
        Some((status, response)) => (status, axum::Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Compares the request's bearer token in constant time.
fn bearer_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|provided| bool::from(provided.trim().as_bytes().ct_eq(expected.as_bytes())))
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier; absent on notifications.
    #[serde(default)]
    id: Option<Value>,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Returns the result payload.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Returns the error code when the response is an error.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|error| error.code)
    }
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Tool call response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolCallResult {
    /// Tool output content.
    content: Vec<ToolContent>,
    /// Envelope as structured JSON.
    structured_content: Value,
    /// True when the envelope carries an error.
    is_error: bool,
}

/// Tool output payloads for JSON-RPC responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolContent {
    /// Text tool output.
    Text {
        /// Envelope rendered as JSON text.
        text: String,
    },
}

/// Dispatches JSON-RPC requests to the dispatcher.
#[derive(Clone)]
pub struct RequestHandler {
    /// Operation dispatcher.
    dispatcher: Dispatcher,
}

impl RequestHandler {
    /// Creates a handler over a dispatcher.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
        }
    }

    /// Handles one request; notifications produce no response.
    pub async fn handle(
        &self,
        request: JsonRpcRequest,
        transport: &'static str,
    ) -> Option<(StatusCode, JsonRpcResponse)> {
        if request.method.starts_with("notifications/") {
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);
        if request.jsonrpc != "2.0" {
            return Some((StatusCode::BAD_REQUEST, error_response(id, -32600, "invalid json-rpc version")));
        }
        let response = match request.method.as_str() {
            "initialize" => success(id, initialize_result(request.params.as_ref())),
            "ping" => success(id, json!({})),
            "tools/list" => match serde_json::to_value(ToolListResult {
                tools: tool_definitions(),
            }) {
                Ok(value) => success(id, value),
                Err(_) => (StatusCode::OK, error_response(id, -32060, "serialization failed")),
            },
            "tools/call" => {
                let params = request.params.unwrap_or(Value::Null);
                match serde_json::from_value::<ToolCallParams>(params) {
                    Ok(call) => self.call_tool(id, call, transport).await,
                    Err(_) => (StatusCode::BAD_REQUEST, error_response(id, -32602, "invalid tool params")),
                }
            }
            _ => (StatusCode::BAD_REQUEST, error_response(id, -32601, "method not found")),
        };
        Some(response)
    }

    /// Runs a tool call and wraps its envelope as a tool result.
    async fn call_tool(
        &self,
        id: Value,
        call: ToolCallParams,
        transport: &'static str,
    ) -> (StatusCode, JsonRpcResponse) {
        let context = CallContext::new(transport).with_request_id(id.to_string());
        let envelope = self.dispatcher.dispatch(&context, &call.name, &call.arguments).await;
        let structured = envelope.to_value();
        let Ok(text) = serde_json::to_string(&structured) else {
            return (StatusCode::OK, error_response(id, -32060, "serialization failed"));
        };
        let result = ToolCallResult {
            content: vec![ToolContent::Text {
                text,
            }],
            structured_content: structured,
            is_error: !envelope.is_ok(),
        };
        match serde_json::to_value(result) {
            Ok(value) => success(id, value),
            Err(_) => (StatusCode::OK, error_response(id, -32060, "serialization failed")),
        }
    }
}

/// Builds the `initialize` result, echoing the client's protocol version.
fn initialize_result(params: Option<&Value>) -> Value {
    let protocol_version = params
        .and_then(|params| params.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    json!({
        "protocolVersion": protocol_version,
        "capabilities": {"tools": {"listChanged": false}},
        "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")},
    })
}

/// Builds a successful JSON-RPC response.
fn success(id: Value, result: Value) -> (StatusCode, JsonRpcResponse) {
    (
        StatusCode::OK,
        JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        },
    )
}

/// Builds a JSON-RPC error response.
fn error_response(id: Value, code: i64, message: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
    }
}

/// Builds the response for a message that is not a JSON-RPC request.
fn invalid_request() -> (StatusCode, JsonRpcResponse) {
    (StatusCode::BAD_REQUEST, error_response(Value::Null, -32600, "invalid json-rpc request"))
}

// ============================================================================
// SECTION: Framing Helpers
// ============================================================================

/// Message framing observed on stdio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One JSON document per line.
    Line,
    /// MCP `Content-Length` headers followed by the body.
    ContentLength,
}

/// Reads the next stdio message, detecting its framing. Returns `None` at EOF.
///
/// # Errors
///
/// Returns [`McpServerError::Transport`] on read failures, malformed headers,
/// or payloads over `max_body_bytes`.
pub async fn read_message<R>(
    reader: &mut R,
    max_body_bytes: usize,
) -> Result<Option<(Framing, Vec<u8>)>, McpServerError>
where
    R: AsyncBufRead + Unpin,
{
    let line_limit = u64::try_from(max_body_bytes).unwrap_or(u64::MAX).saturating_add(2);
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = (&mut *reader)
            .take(line_limit)
            .read_line(&mut line)
            .await
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if header_value(trimmed, "content-length").is_some() {
            let body = read_framed_body(reader, trimmed, max_body_bytes).await?;
            return Ok(Some((Framing::ContentLength, body)));
        }
        if trimmed.len() > max_body_bytes {
            return Err(McpServerError::Transport("payload too large".to_string()));
        }
        return Ok(Some((Framing::Line, trimmed.as_bytes().to_vec())));
    }
}

/// Reads the remaining headers and the body of a `Content-Length` message.
async fn read_framed_body<R>(
    reader: &mut R,
    first_header: &str,
    max_body_bytes: usize,
) -> Result<Vec<u8>, McpServerError>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length = parse_content_length(first_header)?;
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = (&mut *reader)
            .take(8 * 1024)
            .read_line(&mut line)
            .await
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            return Err(McpServerError::Transport("stdio closed".to_string()));
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        if header_value(trimmed, "content-length").is_some() {
            content_length = parse_content_length(trimmed)?;
        }
    }
    if content_length > max_body_bytes {
        return Err(McpServerError::Transport("payload too large".to_string()));
    }
    let mut buf = vec![0u8; content_length];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
    Ok(buf)
}

/// Returns a header's value when the line carries the named header.
fn header_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let (key, value) = line.split_once(':')?;
    key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
}

/// Parses the value of a `Content-Length` header line.
fn parse_content_length(line: &str) -> Result<usize, McpServerError> {
    header_value(line, "content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .ok_or_else(|| McpServerError::Transport("invalid content length".to_string()))
}

/// Writes one stdio message in the given framing.
///
/// # Errors
///
/// Returns [`McpServerError::Transport`] when the write fails.
pub async fn write_message<W>(writer: &mut W, framing: Framing, payload: &[u8]) -> Result<(), McpServerError>
where
    W: AsyncWrite + Unpin,
{
    let write_failed = |_| McpServerError::Transport("stdio write failed".to_string());
    match framing {
        Framing::Line => {
            writer.write_all(payload).await.map_err(write_failed)?;
            writer.write_all(b"\n").await.map_err(write_failed)?;
        }
        Framing::ContentLength => {
            let header = format!("Content-Length: {}\r\n\r\n", payload.len());
            writer.write_all(header.as_bytes()).await.map_err(write_failed)?;
            writer.write_all(payload).await.map_err(write_failed)?;
        }
    }
    writer.flush().await.map_err(write_failed)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, thiserror::Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
