// crates/jira-bridge-broker/src/payload.rs
// ============================================================================
// Module: Attachment Payloads
// Description: Dual-origin attachment inputs and their resolved form.
// Purpose: Enforce exactly one attachment origin at construction.
// Dependencies: std
// ============================================================================

//! ## Overview
//! An [`AttachmentPayload`] names exactly one origin: a filesystem path or
//! inline content with its encoding. A [`ResolvedAttachment`] carries the
//! decoded bytes and their digest.

use std::fmt;
use std::path::PathBuf;

use crate::digest::sha256_hex;
use crate::source::CodecError;

// ============================================================================
// SECTION: Inline Encoding
// ============================================================================

/// Encoding of inline attachment content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InlineEncoding {
    /// Text taken verbatim as UTF-8 bytes.
    #[default]
    Utf8,
    /// Standard base64.
    Base64,
}

impl InlineEncoding {
    /// Parses an encoding label, accepting common spellings case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encoding`] for unsupported labels.
    pub fn parse(label: &str) -> Result<Self, CodecError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "text" => Ok(Self::Utf8),
            "base64" => Ok(Self::Base64),
            other => Err(CodecError::Encoding(format!("unsupported encoding: {other}"))),
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for InlineEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Attachment input with exactly one origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentPayload {
    /// Local file to read.
    Path {
        /// Path of the file.
        source_path: PathBuf,
    },
    /// Content supplied by the caller.
    Inline {
        /// Attachment file name.
        filename: String,
        /// Encoded content.
        content: String,
        /// Content encoding.
        encoding: InlineEncoding,
    },
}

impl AttachmentPayload {
    /// Creates a path-origin payload.
    #[must_use]
    pub fn path(source_path: impl Into<PathBuf>) -> Self {
        Self::Path {
            source_path: source_path.into(),
        }
    }

    /// Creates an inline-origin payload.
    #[must_use]
    pub fn inline(filename: impl Into<String>, content: impl Into<String>, encoding: InlineEncoding) -> Self {
        Self::Inline {
            filename: filename.into(),
            content: content.into(),
            encoding,
        }
    }
}

/// Attachment bytes ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedAttachment {
    /// File name reported to the backend.
    pub filename: String,
    /// Full attachment bytes.
    pub bytes: Vec<u8>,
    /// Lowercase hex SHA-256 of `bytes`.
    pub sha256: String,
}

impl ResolvedAttachment {
    /// Creates a resolved attachment and computes its digest.
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let sha256 = sha256_hex(&bytes);
        Self {
            filename: filename.into(),
            bytes,
            sha256,
        }
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}

impl fmt::Debug for ResolvedAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAttachment")
            .field("filename", &self.filename)
            .field("size", &self.bytes.len())
            .field("sha256", &self.sha256)
            .finish()
    }
}
