// crates/jira-bridge-mcp/tests/protocol.rs
// ============================================================================
// Module: Protocol Tests
// Description: JSON-RPC handling over the request handler and HTTP router.
// Purpose: Verify tool listing, tool-call results and HTTP guards.
// Dependencies: jira-bridge-mcp, axum, tokio
// ============================================================================

//! MCP protocol tests.

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

mod common;

use std::time::Duration;

use jira_bridge_config::ServerConfig;
use jira_bridge_config::ServerTransport;
use jira_bridge_mcp::JsonRpcRequest;
use jira_bridge_mcp::RequestHandler;
use jira_bridge_mcp::http_router;
use jira_bridge_mcp::serve_stream;
use serde_json::Value;
use serde_json::json;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;

use crate::common::Harness;

fn handler() -> RequestHandler {
    RequestHandler::new(Harness::new().dispatcher)
}

async fn rpc(handler: &RequestHandler, request: Value) -> Option<Value> {
    let request: JsonRpcRequest = serde_json::from_value(request).unwrap();
    handler.handle(request, "stdio").await.map(|(_, response)| serde_json::to_value(response).unwrap())
}

// ============================================================================
// SECTION: JSON-RPC
// ============================================================================

#[tokio::test]
async fn initialize_reports_server_info_and_tools_capability() {
    let response = rpc(
        &handler(),
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2025-03-26"}}),
    )
    .await
    .unwrap();
    assert_eq!(response["result"]["serverInfo"]["name"], "jira-bridge");
    assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn notifications_get_no_response() {
    let response =
        rpc(&handler(), json!({"jsonrpc": "2.0", "method": "notifications/initialized"})).await;
    assert!(response.is_none());
}

#[tokio::test]
async fn tools_list_advertises_every_operation() {
    let response = rpc(&handler(), json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await.unwrap();
    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 15);
    assert_eq!(tools[0]["name"], "create_jira_issue");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn tools_call_wraps_the_envelope() {
    let response = rpc(
        &handler(),
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "get_issue", "arguments": {"issueKey": "TEST-123"}}
        }),
    )
    .await
    .unwrap();
    let result = &response["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(result["structuredContent"]["ok"], true);
    assert_eq!(result["structuredContent"]["data"]["key"], "TEST-123");
    let text = result["content"][0]["text"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed, result["structuredContent"]);
    assert_eq!(result["content"][0]["type"], "text");
}

#[tokio::test]
async fn failed_operations_are_tool_errors_not_rpc_errors() {
    let response = rpc(
        &handler(),
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "get_issue", "arguments": {}}
        }),
    )
    .await
    .unwrap();
    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    assert_eq!(response["result"]["structuredContent"]["error"]["kind"], "MissingParameter");
}

#[tokio::test]
async fn unknown_method_and_bad_version_are_rpc_errors() {
    let handler = handler();
    let unknown = rpc(&handler, json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"})).await.unwrap();
    assert_eq!(unknown["error"]["code"], -32601);
    let version = rpc(&handler, json!({"jsonrpc": "1.0", "id": 6, "method": "ping"})).await.unwrap();
    assert_eq!(version["error"]["code"], -32600);
    let params = rpc(&handler, json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {}}))
        .await
        .unwrap();
    assert_eq!(params["error"]["code"], -32602);
}

// ============================================================================
// SECTION: Stdio
// ============================================================================

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    format!("{request}\n")
}

#[tokio::test(flavor = "multi_thread")]
async fn stdio_answers_later_calls_while_an_earlier_one_is_pending() {
    let harness = Harness::new();
    let gate = harness.tracker.hold_searches();
    let (client, server_side) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_side);
    let server = tokio::spawn(serve_stream(
        RequestHandler::new(harness.dispatcher),
        BufReader::new(server_read),
        server_write,
        1024 * 1024,
    ));
    let (client_read, mut client_write) = tokio::io::split(client);
    let mut responses = BufReader::new(client_read).lines();

    let mut transcript = tool_call(1, "search_issues", json!({"jql": "status = Open"}));
    transcript.push_str(&tool_call(2, "get_issue", json!({"issueKey": "TEST-123"})));
    transcript.push_str(&tool_call(3, "list_fields", json!({})));
    transcript.push_str("{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n");
    transcript.push_str("{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"tools/list\"}\n");
    client_write.write_all(transcript.as_bytes()).await.unwrap();

    let mut early_ids = Vec::new();
    for _ in 0..3 {
        let line = tokio::time::timeout(Duration::from_secs(5), responses.next_line())
            .await
            .expect("response while search is held")
            .unwrap()
            .unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        early_ids.push(response["id"].as_u64().unwrap());
    }
    early_ids.sort_unstable();
    assert_eq!(early_ids, vec![2, 3, 4]);

    gate.notify_one();
    let line = tokio::time::timeout(Duration::from_secs(5), responses.next_line()).await.unwrap().unwrap().unwrap();
    let response: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["isError"], false);
    assert_eq!(response["result"]["structuredContent"]["data"].as_array().unwrap().len(), 2);

    client_write.shutdown().await.unwrap();
    server.await.unwrap().unwrap();
    assert!(responses.next_line().await.unwrap().is_none());
}

// ============================================================================
// SECTION: HTTP
// ============================================================================

async fn start_http(config: ServerConfig) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = http_router(handler(), &config);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn post(addr: std::net::SocketAddr, body: &str, token: Option<&str>) -> String {
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let auth = token.map(|token| format!("Authorization: Bearer {token}\r\n")).unwrap_or_default();
    let request = format!(
        "POST /rpc HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\n{auth}Content-Length: \
         {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn http_config(bearer_token: Option<&str>) -> ServerConfig {
    ServerConfig {
        transport: ServerTransport::Http,
        bind: Some("127.0.0.1:0".to_string()),
        max_body_bytes: 4096,
        bearer_token: bearer_token.map(str::to_string),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn http_serves_tool_calls() {
    let addr = start_http(http_config(None)).await;
    let body = r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"list_link_types","arguments":{}}}"#;
    let response = post(addr, body, None).await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("\"isError\":false"));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_requires_configured_bearer_token() {
    let addr = start_http(http_config(Some("s3cret"))).await;
    let body = r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;
    let denied = post(addr, body, None).await;
    assert!(denied.starts_with("HTTP/1.1 401"), "{denied}");
    let wrong = post(addr, body, Some("guess")).await;
    assert!(wrong.starts_with("HTTP/1.1 401"), "{wrong}");
    let allowed = post(addr, body, Some("s3cret")).await;
    assert!(allowed.starts_with("HTTP/1.1 200"), "{allowed}");
}

#[tokio::test(flavor = "multi_thread")]
async fn http_rejects_oversized_bodies() {
    let addr = start_http(http_config(None)).await;
    let body = format!(r#"{{"jsonrpc":"2.0","id":1,"method":"ping","pad":"{}"}}"#, "x".repeat(5000));
    let response = post(addr, &body, None).await;
    assert!(response.starts_with("HTTP/1.1 413"), "{response}");
}
