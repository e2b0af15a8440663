// crates/jira-bridge-client/src/error.rs
// ============================================================================
// Module: Backend Errors
// Description: Tagged failures raised by issue-tracker backends.
// Purpose: Keep backend-native failures from crossing the adapter boundary.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Backend failures are reduced to a [`BackendErrorKind`] tag plus the
//! backend's own message. HTTP status codes map onto the tag; transport and
//! decode failures are [`BackendErrorKind::Other`].

use serde_json::Value;
use thiserror::Error;

/// Backend failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Credentials were rejected.
    Auth,
    /// The addressed entity does not exist.
    NotFound,
    /// The account lacks permission.
    PermissionDenied,
    /// Any other failure.
    Other,
}

impl BackendErrorKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Auth,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            _ => Self::Other,
        }
    }
}

/// Tagged backend failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    /// Failure classification.
    pub kind: BackendErrorKind,
    /// Backend-provided message.
    pub message: String,
    /// HTTP status when the failure came from a response.
    pub status: Option<u16>,
}

impl BackendError {
    /// Creates an error of the given kind without a status.
    #[must_use]
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::NotFound, message)
    }

    /// Creates an untagged backend error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Other, message)
    }

    /// Builds an error from a non-success HTTP response.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self {
            kind: BackendErrorKind::from_status(status),
            message: response_message(status, body),
            status: Some(status),
        }
    }
}

/// Extracts the most useful message from a Jira error body.
///
/// Jira reports failures as `{"errorMessages": [...], "errors": {field: msg}}`.
fn response_message(status: u16, body: &[u8]) -> String {
    let mut parts = Vec::new();
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(Value::Array(messages)) = map.get("errorMessages") {
            parts.extend(messages.iter().filter_map(Value::as_str).map(str::to_string));
        }
        if let Some(Value::Object(errors)) = map.get("errors") {
            parts.extend(
                errors
                    .iter()
                    .filter_map(|(field, message)| message.as_str().map(|m| format!("{field}: {m}"))),
            );
        }
    }
    if parts.is_empty() {
        let preview = String::from_utf8_lossy(body);
        let preview = preview.trim();
        if preview.is_empty() {
            return format!("http status {status}");
        }
        return format!("http status {status}: {}", truncate(preview, 512));
    }
    parts.join("; ")
}

/// Truncates text to at most `max` characters.
fn truncate(text: &str, max: usize) -> &str {
    text.char_indices().nth(max).map_or(text, |(index, _)| &text[.. index])
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use super::BackendError;
    use super::BackendErrorKind;

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(BackendErrorKind::from_status(401), BackendErrorKind::Auth);
        assert_eq!(BackendErrorKind::from_status(403), BackendErrorKind::PermissionDenied);
        assert_eq!(BackendErrorKind::from_status(404), BackendErrorKind::NotFound);
        assert_eq!(BackendErrorKind::from_status(500), BackendErrorKind::Other);
        assert_eq!(BackendErrorKind::from_status(400), BackendErrorKind::Other);
    }

    #[test]
    fn jira_error_bodies_are_flattened() {
        let body = br#"{"errorMessages":["Issue does not exist"],"errors":{"summary":"required"}}"#;
        let error = BackendError::from_response(404, body);
        assert_eq!(error.kind, BackendErrorKind::NotFound);
        assert_eq!(error.message, "Issue does not exist; summary: required");
        assert_eq!(error.status, Some(404));
    }

    #[test]
    fn non_json_bodies_fall_back_to_status() {
        let error = BackendError::from_response(502, b"");
        assert_eq!(error.message, "http status 502");
        let error = BackendError::from_response(500, b"upstream exploded");
        assert_eq!(error.message, "http status 500: upstream exploded");
    }
}
