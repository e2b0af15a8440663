// crates/jira-bridge-core/src/envelope.rs
// ============================================================================
// Module: Result Envelope
// Description: Uniform success/error wrapper returned by every operation.
// Purpose: Give every front end one bit-exact result shape.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every invocation path returns a [`ResultEnvelope`], serialized as
//! `{"ok": true, "data": ...}` or
//! `{"ok": false, "error": {"kind": ..., "message": ..., "detail"?: ...}}`.
//! [`ResultEnvelope::into_flat`] renders the historical bare form where the
//! `error` key is present only on failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeStruct;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// User-facing error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A required parameter was not supplied.
    MissingParameter,
    /// A parameter had the wrong type.
    InvalidParameterType,
    /// The operation name is not registered.
    UnknownOperation,
    /// A local attachment file does not exist.
    FileNotFound,
    /// A local attachment file could not be read.
    FileReadError,
    /// A retrieved attachment could not be written.
    FileWriteError,
    /// Inline content could not be decoded.
    InvalidEncoding,
    /// An attachment exceeded the size cap.
    PayloadTooLarge,
    /// The requested link type does not exist.
    InvalidLinkType,
    /// The backend rejected the credentials.
    BackendAuthError,
    /// The backend could not find the entity.
    BackendNotFound,
    /// The backend denied the action.
    BackendPermissionDenied,
    /// Any other backend failure.
    BackendError,
    /// Unanticipated failure.
    InternalError,
}

/// Coarse grouping of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller supplied malformed arguments.
    Validation,
    /// Attachment resolution or storage failed.
    Codec,
    /// The backend failed or rejected the call.
    Backend,
    /// Unanticipated failure.
    Internal,
}

impl ErrorKind {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameter => "MissingParameter",
            Self::InvalidParameterType => "InvalidParameterType",
            Self::UnknownOperation => "UnknownOperation",
            Self::FileNotFound => "FileNotFound",
            Self::FileReadError => "FileReadError",
            Self::FileWriteError => "FileWriteError",
            Self::InvalidEncoding => "InvalidEncoding",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::InvalidLinkType => "InvalidLinkType",
            Self::BackendAuthError => "BackendAuthError",
            Self::BackendNotFound => "BackendNotFound",
            Self::BackendPermissionDenied => "BackendPermissionDenied",
            Self::BackendError => "BackendError",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the category the kind belongs to.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::MissingParameter | Self::InvalidParameterType | Self::UnknownOperation => {
                ErrorCategory::Validation
            }
            Self::FileNotFound
            | Self::FileReadError
            | Self::FileWriteError
            | Self::InvalidEncoding
            | Self::PayloadTooLarge => ErrorCategory::Codec,
            Self::InvalidLinkType
            | Self::BackendAuthError
            | Self::BackendNotFound
            | Self::BackendPermissionDenied
            | Self::BackendError => ErrorCategory::Backend,
            Self::InternalError => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Error Body
// ============================================================================

/// Error payload carried by a failed envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Error kind.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Optional structured detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Creates an error body without detail.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    /// Attaches structured detail.
    #[must_use]
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Uniform result of one operation call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope {
    /// Successful call with its neutral projection.
    Ok(Value),
    /// Failed call with its normalized error.
    Err(ErrorBody),
}

impl ResultEnvelope {
    /// Returns true for successful envelopes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns the error body of a failed envelope.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorBody> {
        match self {
            Self::Ok(_) => None,
            Self::Err(error) => Some(error),
        }
    }

    /// Returns the data of a successful envelope.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Ok(data) => Some(data),
            Self::Err(_) => None,
        }
    }

    /// Renders the envelope as JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Ok(data) => json!({"ok": true, "data": data}),
            Self::Err(error) => json!({"ok": false, "error": error}),
        }
    }

    /// Renders the historical bare form: `data` on success, `{"error": ...}` on failure.
    #[must_use]
    pub fn into_flat(self) -> Value {
        match self {
            Self::Ok(data) => data,
            Self::Err(error) => json!({"error": error}),
        }
    }
}

impl From<Result<Value, ErrorBody>> for ResultEnvelope {
    fn from(result: Result<Value, ErrorBody>) -> Self {
        match result {
            Ok(data) => Self::Ok(data),
            Err(error) => Self::Err(error),
        }
    }
}

impl Serialize for ResultEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ResultEnvelope", 2)?;
        match self {
            Self::Ok(data) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Err(error) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
