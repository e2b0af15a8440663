// crates/jira-bridge-mcp/src/normalize.rs
// ============================================================================
// Module: Error Normalizer
// Description: Maps dispatch failures onto the user-facing error taxonomy.
// Purpose: Keep the kind and message decision in exactly one place.
// Dependencies: jira-bridge-core, jira-bridge-client, jira-bridge-broker
// ============================================================================

//! ## Overview
//! [`normalize`] is the only function that turns an internal failure into an
//! [`ErrorBody`]. Backend messages are preserved verbatim; structured detail
//! is attached where the caller can act on it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jira_bridge_broker::CodecError;
use jira_bridge_client::BackendError;
use jira_bridge_client::BackendErrorKind;
use jira_bridge_core::ErrorBody;
use jira_bridge_core::ErrorKind;
use jira_bridge_core::ValidationError;
use serde_json::json;

use crate::adapter::AdapterError;
use crate::dispatcher::DispatchError;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Converts a dispatch failure into its user-facing error body.
#[must_use]
pub fn normalize(error: &DispatchError) -> ErrorBody {
    match error {
        DispatchError::UnknownOperation(err) => ErrorBody::new(ErrorKind::UnknownOperation, err.to_string()),
        DispatchError::Validation(err) => validation(err),
        DispatchError::Adapter(err) => adapter(err),
        DispatchError::Encoding(_) | DispatchError::Internal(_) => {
            ErrorBody::new(ErrorKind::InternalError, error.to_string())
        }
    }
}

/// Maps a validation failure to its error body.
fn validation(error: &ValidationError) -> ErrorBody {
    let kind = match error {
        ValidationError::MissingParameter {
            ..
        } => ErrorKind::MissingParameter,
        ValidationError::InvalidParameterType {
            ..
        } => ErrorKind::InvalidParameterType,
    };
    ErrorBody::new(kind, error.to_string()).with_detail(json!({"parameter": error.parameter()}))
}

/// Maps an adapter failure, unwrapping partial failures to their cause.
fn adapter(error: &AdapterError) -> ErrorBody {
    match error {
        AdapterError::Validation(err) => validation(err),
        AdapterError::Codec(err) => codec(err),
        AdapterError::Backend(err) => backend(err),
        AdapterError::InvalidLinkType {
            requested,
            known,
        } => ErrorBody::new(ErrorKind::InvalidLinkType, error.to_string())
            .with_detail(json!({"requested": requested, "known": known})),
        AdapterError::PartialFailure {
            step,
            completed,
            comment_id,
            source,
        } => {
            let inner = adapter(source);
            ErrorBody::new(inner.kind, error.to_string()).with_detail(json!({
                "step": step,
                "completedSteps": completed,
                "commentId": comment_id,
            }))
        }
        AdapterError::Internal(message) => ErrorBody::new(ErrorKind::InternalError, message.clone()),
    }
}

/// Maps an attachment codec failure to its error body.
fn codec(error: &CodecError) -> ErrorBody {
    match error {
        CodecError::NotFound(_) => ErrorBody::new(ErrorKind::FileNotFound, error.to_string()),
        CodecError::Read(_) => ErrorBody::new(ErrorKind::FileReadError, error.to_string()),
        CodecError::Write(_) => ErrorBody::new(ErrorKind::FileWriteError, error.to_string()),
        CodecError::Encoding(_) => ErrorBody::new(ErrorKind::InvalidEncoding, error.to_string()),
        CodecError::TooLarge {
            max_bytes,
            actual_bytes,
        } => ErrorBody::new(ErrorKind::PayloadTooLarge, error.to_string())
            .with_detail(json!({"maxBytes": max_bytes, "actualBytes": actual_bytes})),
    }
}

/// Maps a backend failure, keeping its message and status.
fn backend(error: &BackendError) -> ErrorBody {
    let kind = match error.kind {
        BackendErrorKind::Auth => ErrorKind::BackendAuthError,
        BackendErrorKind::NotFound => ErrorKind::BackendNotFound,
        BackendErrorKind::PermissionDenied => ErrorKind::BackendPermissionDenied,
        BackendErrorKind::Other => ErrorKind::BackendError,
    };
    let body = ErrorBody::new(kind, error.message.clone());
    match error.status {
        Some(status) => body.with_detail(json!({"status": status})),
        None => body,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
