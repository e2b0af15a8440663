// crates/jira-bridge-mcp/src/audit.rs
// ============================================================================
// Module: Dispatch Audit Logging
// Description: Structured audit events for operation dispatch.
// Purpose: Emit one JSON line per call without logging argument values.
// Dependencies: jira-bridge-config, serde
// ============================================================================

//! ## Overview
//! Every dispatched call produces exactly one [`DispatchAuditEvent`]. Events
//! carry the operation name, final stage, outcome, error kind and duration;
//! argument values and backend payloads are never recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use jira_bridge_config::AuditConfig;
use jira_bridge_config::AuditSinkKind;
use jira_bridge_core::ErrorKind;
use serde::Serialize;

use crate::dispatcher::DispatchOutcome;
use crate::dispatcher::DispatchStage;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Dispatch audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Front end that issued the call.
    pub transport: &'static str,
    /// Request identifier when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Requested operation name, as supplied.
    pub operation: String,
    /// Stage the call ended in.
    pub stage: DispatchStage,
    /// Call outcome.
    pub outcome: DispatchOutcome,
    /// Error kind on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Wall-clock duration of the call.
    pub duration_ms: u128,
}

/// Inputs required to construct a dispatch audit event.
pub struct DispatchAuditEventParams {
    /// Front end that issued the call.
    pub transport: &'static str,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Requested operation name.
    pub operation: String,
    /// Stage the call ended in.
    pub stage: DispatchStage,
    /// Call outcome.
    pub outcome: DispatchOutcome,
    /// Error kind on failure.
    pub error_kind: Option<ErrorKind>,
    /// Wall-clock duration of the call.
    pub duration_ms: u128,
}

impl DispatchAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: DispatchAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "dispatch",
            timestamp_ms,
            transport: params.transport,
            request_id: params.request_id,
            operation: params.operation,
            stage: params.stage,
            outcome: params.outcome,
            error_kind: params.error_kind,
            duration_ms: params.duration_ms,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for dispatch events.
pub trait DispatchAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &DispatchAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl DispatchAuditSink for StderrAuditSink {
    fn record(&self, event: &DispatchAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DispatchAuditSink for FileAuditSink {
    fn record(&self, event: &DispatchAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl DispatchAuditSink for NoopAuditSink {
    fn record(&self, _event: &DispatchAuditEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the audit sink selected by configuration.
///
/// `verbose` selects the stderr sink when the configuration selects none.
///
/// # Errors
///
/// Returns an error when the file sink cannot open its log file.
pub fn audit_sink_from_config(
    config: &AuditConfig,
    verbose: bool,
) -> io::Result<Arc<dyn DispatchAuditSink>> {
    match (config.sink, config.path.as_deref()) {
        (AuditSinkKind::File, Some(path)) => Ok(Arc::new(FileAuditSink::new(Path::new(path))?)),
        (AuditSinkKind::File, None) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "audit.path is required for the file sink",
        )),
        (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
        (AuditSinkKind::None, _) if verbose => Ok(Arc::new(StderrAuditSink)),
        (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
