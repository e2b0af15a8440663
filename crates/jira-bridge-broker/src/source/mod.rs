// crates/jira-bridge-broker/src/source/mod.rs
// ============================================================================
// Module: Attachment Sources
// Description: Codec errors and the file and inline attachment sources.
// Purpose: Resolve attachment inputs into bytes with a hard size cap.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Sources turn one attachment origin into bytes. Implementations must fail
//! closed: a read or decode failure never yields partial bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum attachment size accepted by sources and sinks.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

// ============================================================================
// SECTION: Codec Errors
// ============================================================================

/// Errors emitted while resolving or storing attachments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Source file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),
    /// Source file could not be read.
    #[error("failed to read file: {0}")]
    Read(String),
    /// Destination file could not be written.
    #[error("failed to write file: {0}")]
    Write(String),
    /// Inline content could not be decoded.
    #[error("invalid encoding: {0}")]
    Encoding(String),
    /// Payload exceeded the size cap.
    #[error("attachment exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual or estimated payload size in bytes.
        actual_bytes: usize,
    },
}

/// Returns an error when a payload exceeds the size cap.
pub(crate) const fn enforce_max_bytes(actual_bytes: usize) -> Result<(), CodecError> {
    if actual_bytes > MAX_ATTACHMENT_BYTES {
        return Err(CodecError::TooLarge {
            max_bytes: MAX_ATTACHMENT_BYTES,
            actual_bytes,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

pub mod file;
pub mod inline;

pub use file::FileSource;
pub use inline::InlineSource;
