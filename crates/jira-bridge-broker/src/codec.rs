// crates/jira-bridge-broker/src/codec.rs
// ============================================================================
// Module: Attachment Codec
// Description: Resolves attachment payloads and stores retrieved bytes.
// Purpose: Single entry point for attachment encoding concerns.
// Dependencies: base64
// ============================================================================

//! ## Overview
//! [`AttachmentCodec`] routes each [`AttachmentPayload`] origin to its source
//! and exposes the sink and inline encoder used on retrieval.
//!
//! ## Invariants
//! - `resolve` returns full bytes or an error, never a partial result.
//! - The codec performs no backend calls.

use std::path::Path;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::payload::AttachmentPayload;
use crate::payload::ResolvedAttachment;
use crate::sink::FileSink;
use crate::source::CodecError;
use crate::source::FileSource;
use crate::source::InlineSource;

/// Attachment codec combining sources and the file sink.
#[derive(Debug, Clone, Default)]
pub struct AttachmentCodec {
    /// Path-origin source.
    file: FileSource,
    /// Inline-origin source.
    inline: InlineSource,
    /// Retrieval sink.
    sink: FileSink,
}

impl AttachmentCodec {
    /// Creates a codec with optional root confinement for file access.
    #[must_use]
    pub fn new(root: Option<PathBuf>) -> Self {
        match root {
            Some(root) => Self {
                file: FileSource::new(root.clone()),
                inline: InlineSource::new(),
                sink: FileSink::new(root),
            },
            None => Self::default(),
        }
    }

    /// Resolves a payload into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the origin cannot be read or decoded.
    pub fn resolve(&self, payload: &AttachmentPayload) -> Result<ResolvedAttachment, CodecError> {
        match payload {
            AttachmentPayload::Path {
                source_path,
            } => self.file.read(source_path),
            AttachmentPayload::Inline {
                filename,
                content,
                encoding,
            } => self.inline.decode(filename, content, *encoding),
        }
    }

    /// Writes retrieved bytes to a local path and returns the size written.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Write`] when the file cannot be written.
    pub fn write_to_path(&self, path: &Path, bytes: &[u8]) -> Result<u64, CodecError> {
        self.sink.write(path, bytes)
    }

    /// Encodes bytes as standard base64.
    #[must_use]
    pub fn encode_inline(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }
}
