// crates/jira-bridge-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: In-memory issue tracker and recording audit sink.
// Purpose: Exercise the dispatcher without a live Jira instance.
// Dependencies: jira-bridge-client, jira-bridge-mcp
// ============================================================================

//! ## Overview
//! [`FakeTracker`] implements [`IssueTracker`] over an in-memory issue map.
//! It records every backend call so tests can prove which calls were (or were
//! not) made.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use jira_bridge_broker::AttachmentCodec;
use jira_bridge_client::BackendError;
use jira_bridge_client::BackendErrorKind;
use jira_bridge_client::IssueTracker;
use jira_bridge_client::RemoteAttachment;
use jira_bridge_client::RemoteComment;
use jira_bridge_client::RemoteCommentPage;
use jira_bridge_client::RemoteCreated;
use jira_bridge_client::RemoteField;
use jira_bridge_client::RemoteIssue;
use jira_bridge_client::RemoteIssueFields;
use jira_bridge_client::RemoteIssueType;
use jira_bridge_client::RemoteLinkType;
use jira_bridge_client::RemoteNamed;
use jira_bridge_client::RemoteUser;
use jira_bridge_mcp::BackendAdapter;
use jira_bridge_mcp::CallContext;
use jira_bridge_mcp::DispatchAuditEvent;
use jira_bridge_mcp::DispatchAuditSink;
use jira_bridge_mcp::Dispatcher;
use serde_json::Map;
use serde_json::Value;
use tokio::sync::Notify;

// ============================================================================
// SECTION: Fake Tracker
// ============================================================================

/// Mutable state behind the fake tracker.
#[derive(Default)]
struct FakeState {
    issues: BTreeMap<String, RemoteIssue>,
    attachment_bytes: BTreeMap<String, Vec<u8>>,
    next_key: u64,
    next_id: u64,
    next_child_id: u64,
    fail_uploads: bool,
    backend_failure: Option<BackendError>,
    search_gate: Option<Arc<Notify>>,
    last_fields: Option<Map<String, Value>>,
    last_search: Option<(String, u32)>,
    last_link: Option<(String, String, String)>,
}

/// In-memory issue tracker.
pub struct FakeTracker {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeTracker {
    /// Creates a tracker seeded with `TEST-123` and `TEST-124`.
    pub fn seeded() -> Self {
        let mut state = FakeState {
            next_key: 456,
            next_id: 12345,
            next_child_id: 10000,
            ..FakeState::default()
        };
        state.issues.insert("TEST-123".to_string(), issue("10123", "TEST-123", "Login fails"));
        state.issues.insert("TEST-124".to_string(), issue("10124", "TEST-124", "Logout slow"));
        if let Some(existing) = state.issues.get_mut("TEST-123") {
            existing.fields.comment = Some(comment_page(vec![RemoteComment {
                id: "9001".to_string(),
                author: Some(user("acc-1", "Alice Example", "alice@example.com")),
                body: "Reproduced on staging.".to_string(),
                created: Some("2026-01-05T10:00:00.000+0000".to_string()),
            }]));
        }
        Self {
            state: Mutex::new(state),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes every upload fail with a backend error.
    pub fn fail_uploads(&self) {
        self.state.lock().unwrap().fail_uploads = true;
    }

    /// Makes issue reads, deletes and searches fail as the backend would for `status`.
    pub fn fail_with_status(&self, status: u16, message: &str) {
        self.state.lock().unwrap().backend_failure = Some(BackendError {
            kind: BackendErrorKind::from_status(status),
            message: message.to_string(),
            status: Some(status),
        });
    }

    /// Holds every search until the returned gate is notified.
    pub fn hold_searches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().search_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Returns the backend calls made so far.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the field map of the last create or update.
    pub fn last_fields(&self) -> Option<Map<String, Value>> {
        self.state.lock().unwrap().last_fields.clone()
    }

    /// Returns the last query and page size.
    pub fn last_search(&self) -> Option<(String, u32)> {
        self.state.lock().unwrap().last_search.clone()
    }

    /// Returns the last link request.
    pub fn last_link(&self) -> Option<(String, String, String)> {
        self.state.lock().unwrap().last_link.clone()
    }

    /// Returns true when the issue exists.
    pub fn has_issue(&self, key: &str) -> bool {
        self.state.lock().unwrap().issues.contains_key(key)
    }

    /// Returns the number of comments on an issue.
    pub fn comment_count(&self, key: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .issues
            .get(key)
            .and_then(|issue| issue.fields.comment.as_ref())
            .map_or(0, |page| page.comments.len())
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected_failure(&self) -> Result<(), BackendError> {
        self.state.lock().unwrap().backend_failure.clone().map_or(Ok(()), Err)
    }
}

fn comment_page(comments: Vec<RemoteComment>) -> RemoteCommentPage {
    RemoteCommentPage {
        comments,
    }
}

fn issue(id: &str, key: &str, summary: &str) -> RemoteIssue {
    RemoteIssue {
        id: id.to_string(),
        key: key.to_string(),
        fields: RemoteIssueFields {
            summary: Some(summary.to_string()),
            description: Some("Steps to reproduce".to_string()),
            status: Some(RemoteNamed::named("Open")),
            priority: Some(RemoteNamed::named("High")),
            assignee: Some(user("acc-1", "Alice Example", "alice@example.com")),
            issuetype: Some(RemoteNamed::named("Bug")),
            comment: Some(comment_page(Vec::new())),
            attachment: Some(Vec::new()),
        },
    }
}

fn user(account_id: &str, display_name: &str, email: &str) -> RemoteUser {
    RemoteUser {
        account_id: account_id.to_string(),
        display_name: display_name.to_string(),
        email_address: Some(email.to_string()),
        active: true,
    }
}

fn not_found(key: &str) -> BackendError {
    BackendError {
        kind: BackendErrorKind::NotFound,
        message: format!("Issue {key} does not exist or you do not have permission to see it."),
        status: Some(404),
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn create_issue(&self, fields: Map<String, Value>) -> Result<RemoteCreated, BackendError> {
        self.record("create_issue");
        let mut state = self.state.lock().unwrap();
        let project = fields
            .get("project")
            .and_then(|project| project.get("key"))
            .and_then(Value::as_str)
            .unwrap_or("TEST")
            .to_string();
        let key = format!("{project}-{}", state.next_key);
        let id = state.next_id.to_string();
        state.next_key += 1;
        state.next_id += 1;
        let summary = fields.get("summary").and_then(Value::as_str).unwrap_or_default();
        let mut created = issue(&id, &key, summary);
        created.fields.status = Some(RemoteNamed::named("To Do"));
        state.issues.insert(key.clone(), created);
        state.last_fields = Some(fields);
        Ok(RemoteCreated {
            self_url: format!("https://jira.example.com/rest/api/2/issue/{id}"),
            id,
            key,
        })
    }

    async fn get_issue(&self, key: &str) -> Result<RemoteIssue, BackendError> {
        self.record("get_issue");
        self.injected_failure()?;
        self.state.lock().unwrap().issues.get(key).cloned().ok_or_else(|| not_found(key))
    }

    async fn update_issue(&self, key: &str, fields: Map<String, Value>) -> Result<(), BackendError> {
        self.record("update_issue");
        let mut state = self.state.lock().unwrap();
        let existing = state.issues.get_mut(key).ok_or_else(|| not_found(key))?;
        if let Some(summary) = fields.get("summary").and_then(Value::as_str) {
            existing.fields.summary = Some(summary.to_string());
        }
        if let Some(description) = fields.get("description").and_then(Value::as_str) {
            existing.fields.description = Some(description.to_string());
        }
        state.last_fields = Some(fields);
        Ok(())
    }

    async fn delete_issue(&self, key: &str) -> Result<(), BackendError> {
        self.record("delete_issue");
        self.injected_failure()?;
        self.state.lock().unwrap().issues.remove(key).map(|_| ()).ok_or_else(|| not_found(key))
    }

    async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<RemoteIssue>, BackendError> {
        self.record("search_issues");
        self.injected_failure()?;
        let gate = self.state.lock().unwrap().search_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let mut state = self.state.lock().unwrap();
        state.last_search = Some((jql.to_string(), max_results));
        let limit = usize::try_from(max_results).unwrap();
        Ok(state.issues.values().take(limit).cloned().collect())
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<RemoteComment, BackendError> {
        self.record("add_comment");
        let mut state = self.state.lock().unwrap();
        state.next_child_id += 1;
        let comment = RemoteComment {
            id: state.next_child_id.to_string(),
            author: Some(user("acc-bot", "Bridge Bot", "bot@example.com")),
            body: body.to_string(),
            created: Some("2026-02-01T09:00:00.000+0000".to_string()),
        };
        let existing = state.issues.get_mut(key).ok_or_else(|| not_found(key))?;
        existing.fields.comment.get_or_insert_with(Default::default).comments.push(comment.clone());
        Ok(comment)
    }

    async fn upload_attachment(
        &self,
        key: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<RemoteAttachment>, BackendError> {
        self.record("upload_attachment");
        let mut state = self.state.lock().unwrap();
        if state.fail_uploads {
            return Err(BackendError::other("upload rejected: attachments disabled"));
        }
        state.next_child_id += 1;
        let id = state.next_child_id.to_string();
        let attachment = RemoteAttachment {
            id: id.clone(),
            filename: filename.to_string(),
            size: u64::try_from(bytes.len()).unwrap(),
            mime_type: Some("application/octet-stream".to_string()),
            created: Some("2026-02-01T09:00:00.000+0000".to_string()),
            content: Some(format!("https://jira.example.com/secure/attachment/{id}/{filename}")),
        };
        let existing = state.issues.get_mut(key).ok_or_else(|| not_found(key))?;
        existing.fields.attachment.get_or_insert_with(Vec::new).push(attachment.clone());
        state.attachment_bytes.insert(id, bytes);
        Ok(vec![attachment])
    }

    async fn download_attachment(&self, attachment: &RemoteAttachment) -> Result<Vec<u8>, BackendError> {
        self.record("download_attachment");
        self.state
            .lock()
            .unwrap()
            .attachment_bytes
            .get(&attachment.id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("attachment content missing"))
    }

    async fn create_link(&self, link_type: &str, inward: &str, outward: &str) -> Result<(), BackendError> {
        self.record("create_link");
        self.state.lock().unwrap().last_link =
            Some((link_type.to_string(), inward.to_string(), outward.to_string()));
        Ok(())
    }

    async fn list_fields(&self) -> Result<Vec<RemoteField>, BackendError> {
        self.record("list_fields");
        Ok(vec![
            RemoteField {
                id: "summary".to_string(),
                name: "Summary".to_string(),
                custom: false,
            },
            RemoteField {
                id: "customfield_10010".to_string(),
                name: "Story Points".to_string(),
                custom: true,
            },
        ])
    }

    async fn list_issue_types(&self) -> Result<Vec<RemoteIssueType>, BackendError> {
        self.record("list_issue_types");
        Ok(vec![RemoteIssueType {
            id: "1".to_string(),
            name: "Bug".to_string(),
            description: Some("A problem which impairs or prevents the functions of the product.".to_string()),
        }])
    }

    async fn list_link_types(&self) -> Result<Vec<RemoteLinkType>, BackendError> {
        self.record("list_link_types");
        Ok(vec![
            RemoteLinkType {
                id: "10000".to_string(),
                name: "Blocks".to_string(),
                inward: "is blocked by".to_string(),
                outward: "blocks".to_string(),
            },
            RemoteLinkType {
                id: "10003".to_string(),
                name: "Relates".to_string(),
                inward: "relates to".to_string(),
                outward: "relates to".to_string(),
            },
        ])
    }

    async fn search_users(&self, query: &str) -> Result<Vec<RemoteUser>, BackendError> {
        self.record("search_users");
        let users = vec![
            user("acc-2", "Alicia Other", "alicia.other@example.com"),
            user("acc-1", "Alice Example", "alice@example.com"),
        ];
        let needle = query.to_ascii_lowercase();
        Ok(users
            .into_iter()
            .filter(|user| {
                user.email_address.as_deref().is_some_and(|email| email.contains(&needle))
                    || user.display_name.to_ascii_lowercase().contains(&needle)
            })
            .collect())
    }
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<DispatchAuditEvent>>,
}

impl RecordingAuditSink {
    /// Returns the recorded events.
    pub fn events(&self) -> Vec<DispatchAuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DispatchAuditSink for RecordingAuditSink {
    fn record(&self, event: &DispatchAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Test harness bundling the fake backend with a dispatcher.
pub struct Harness {
    pub tracker: Arc<FakeTracker>,
    pub audit: Arc<RecordingAuditSink>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// Builds a harness with unrestricted attachment paths.
    pub fn new() -> Self {
        Self::with_codec(AttachmentCodec::default())
    }

    /// Builds a harness with the given codec.
    pub fn with_codec(codec: AttachmentCodec) -> Self {
        let tracker = Arc::new(FakeTracker::seeded());
        let audit = Arc::new(RecordingAuditSink::default());
        let dispatcher = Dispatcher::new(BackendAdapter::new(tracker.clone(), codec))
            .with_audit(audit.clone());
        Self {
            tracker,
            audit,
            dispatcher,
        }
    }

    /// Dispatches a call as the CLI front end would.
    pub async fn call(&self, name: &str, arguments: Value) -> jira_bridge_core::ResultEnvelope {
        self.dispatcher.dispatch(&CallContext::new("cli"), name, &arguments).await
    }
}
