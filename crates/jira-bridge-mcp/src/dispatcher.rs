// crates/jira-bridge-mcp/src/dispatcher.rs
// ============================================================================
// Module: Dispatcher
// Description: Single entry point from front ends into the backend adapter.
// Purpose: Drive one call through lookup, validation, invocation and encoding.
// Dependencies: jira-bridge-core, serde_json
// ============================================================================

//! ## Overview
//! [`Dispatcher::dispatch`] runs one call through the stages
//! `Idle -> Validating -> Invoking -> Encoding -> Done`. Any failure moves the
//! call to `Failed` and is normalized into the returned envelope.
//!
//! ## Invariants
//! - The dispatcher holds no per-call state between calls.
//! - Validation completes before the adapter is touched.
//! - Every call emits exactly one audit event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use jira_bridge_core::OperationName;
use jira_bridge_core::RegistryError;
use jira_bridge_core::ResultEnvelope;
use jira_bridge_core::ValidatedCall;
use jira_bridge_core::ValidationError;
use jira_bridge_core::lookup;
use jira_bridge_core::validate;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::adapter::AdapterError;
use crate::adapter::BackendAdapter;
use crate::adapter::OperationOutput;
use crate::audit::DispatchAuditEvent;
use crate::audit::DispatchAuditEventParams;
use crate::audit::DispatchAuditSink;
use crate::audit::NoopAuditSink;
use crate::normalize::normalize;

// ============================================================================
// SECTION: Stages
// ============================================================================

/// Lifecycle stage of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStage {
    /// Call received.
    Idle,
    /// Looking up the operation and validating arguments.
    Validating,
    /// Adapter call in flight.
    Invoking,
    /// Serializing the projection.
    Encoding,
    /// Envelope produced successfully.
    Done,
    /// Envelope carries an error.
    Failed,
}

impl DispatchStage {
    /// Returns true when moving to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Invoking)
                | (Self::Invoking, Self::Encoding)
                | (Self::Encoding, Self::Done)
                | (Self::Validating | Self::Invoking | Self::Encoding, Self::Failed)
        )
    }

    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Invoking => "invoking",
            Self::Encoding => "encoding",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns true for `Done` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Final outcome of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The envelope carries data.
    Ok,
    /// The envelope carries an error.
    Error,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures raised while dispatching a call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No operation is registered under the requested name.
    #[error(transparent)]
    UnknownOperation(#[from] RegistryError),
    /// The argument bag failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The adapter failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// The projection could not be serialized.
    #[error("failed to encode result: {0}")]
    Encoding(String),
    /// Unanticipated dispatcher failure.
    #[error("{0}")]
    Internal(String),
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Caller-supplied context recorded with each call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Front end label (`cli`, `repl`, `batch`, `stdio`, `http`).
    pub transport: &'static str,
    /// Request identifier when the front end has one.
    pub request_id: Option<String>,
}

impl CallContext {
    /// Creates a context for a front end without a request id.
    #[must_use]
    pub const fn new(transport: &'static str) -> Self {
        Self {
            transport,
            request_id: None,
        }
    }

    /// Attaches a request identifier.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Routes named calls through validation to the backend adapter.
#[derive(Clone)]
pub struct Dispatcher {
    /// Backend adapter.
    adapter: BackendAdapter,
    /// Audit sink for per-call events.
    audit: Arc<dyn DispatchAuditSink>,
}

impl Dispatcher {
    /// Creates a dispatcher that discards audit events.
    #[must_use]
    pub fn new(adapter: BackendAdapter) -> Self {
        Self {
            adapter,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn DispatchAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Dispatches one call and returns its envelope.
    pub async fn dispatch(&self, context: &CallContext, name: &str, arguments: &Value) -> ResultEnvelope {
        let started = Instant::now();
        let mut stage = DispatchStage::Idle;
        let envelope = match self.run(name, arguments, &mut stage).await {
            Ok(data) => ResultEnvelope::Ok(data),
            Err(err) => {
                stage = DispatchStage::Failed;
                ResultEnvelope::Err(normalize(&err))
            }
        };
        self.audit.record(&DispatchAuditEvent::new(DispatchAuditEventParams {
            transport: context.transport,
            request_id: context.request_id.clone(),
            operation: name.to_string(),
            stage,
            outcome: if envelope.is_ok() { DispatchOutcome::Ok } else { DispatchOutcome::Error },
            error_kind: envelope.error().map(|error| error.kind),
            duration_ms: started.elapsed().as_millis(),
        }));
        envelope
    }

    /// Runs the stages of one call.
    async fn run(
        &self,
        name: &str,
        arguments: &Value,
        stage: &mut DispatchStage,
    ) -> Result<Value, DispatchError> {
        advance(stage, DispatchStage::Validating)?;
        let operation = lookup(name)?;
        let call = validate(operation, arguments)?;

        advance(stage, DispatchStage::Invoking)?;
        let output = self.invoke(&call).await?;

        advance(stage, DispatchStage::Encoding)?;
        let data = serde_json::to_value(&output).map_err(|err| DispatchError::Encoding(err.to_string()))?;

        advance(stage, DispatchStage::Done)?;
        Ok(data)
    }

    /// Invokes the adapter method bound to the call's operation.
    async fn invoke(&self, call: &ValidatedCall) -> Result<OperationOutput, AdapterError> {
        let adapter = &self.adapter;
        match call.operation() {
            OperationName::CreateIssue => adapter.create_issue(call).await,
            OperationName::GetIssue => adapter.get_issue(call).await,
            OperationName::UpdateIssue => adapter.update_issue(call).await,
            OperationName::DeleteIssue => adapter.delete_issue(call).await,
            OperationName::SearchIssues => adapter.search_issues(call).await,
            OperationName::AddComment => adapter.add_comment(call).await,
            OperationName::CreateIssueLink => adapter.create_issue_link(call).await,
            OperationName::GetUser => adapter.get_user(call).await,
            OperationName::ListFields => adapter.list_fields(call).await,
            OperationName::ListIssueTypes => adapter.list_issue_types(call).await,
            OperationName::ListLinkTypes => adapter.list_link_types(call).await,
            OperationName::AttachFile => adapter.attach_file(call).await,
            OperationName::AttachContent => adapter.attach_content(call).await,
            OperationName::GetIssueAttachment => adapter.get_issue_attachment(call).await,
            OperationName::AddCommentWithAttachment => adapter.add_comment_with_attachment(call).await,
        }
    }
}

/// Moves a call to its next stage.
fn advance(stage: &mut DispatchStage, next: DispatchStage) -> Result<(), DispatchError> {
    if !stage.can_transition_to(next) {
        return Err(DispatchError::Internal(format!(
            "illegal dispatch transition {} -> {}",
            stage.as_str(),
            next.as_str()
        )));
    }
    *stage = next;
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use super::DispatchStage;
    use super::advance;

    #[test]
    fn happy_path_transitions_are_legal() {
        let mut stage = DispatchStage::Idle;
        for next in [
            DispatchStage::Validating,
            DispatchStage::Invoking,
            DispatchStage::Encoding,
            DispatchStage::Done,
        ] {
            advance(&mut stage, next).unwrap();
        }
        assert!(stage.is_terminal());
    }

    #[test]
    fn failed_is_reachable_only_from_working_stages() {
        assert!(DispatchStage::Validating.can_transition_to(DispatchStage::Failed));
        assert!(DispatchStage::Invoking.can_transition_to(DispatchStage::Failed));
        assert!(DispatchStage::Encoding.can_transition_to(DispatchStage::Failed));
        assert!(!DispatchStage::Idle.can_transition_to(DispatchStage::Failed));
        assert!(!DispatchStage::Done.can_transition_to(DispatchStage::Failed));
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let mut stage = DispatchStage::Idle;
        assert!(advance(&mut stage, DispatchStage::Invoking).is_err());
        assert_eq!(stage, DispatchStage::Idle);
    }
}
