// crates/jira-bridge-broker/src/lib.rs
// ============================================================================
// Module: Jira Bridge Broker
// Description: Attachment codec resolving dual-origin attachment inputs.
// Purpose: Turn a path or inline content into bytes before any backend call.
// Dependencies: base64, sha2, thiserror
// ============================================================================

//! ## Overview
//! The broker resolves an [`AttachmentPayload`] into a [`ResolvedAttachment`]
//! through a file or inline source, and writes retrieved attachments through
//! a file sink. Resolution never partially succeeds: callers receive either
//! the full bytes with their SHA-256 digest or a [`CodecError`].
//!
//! Security posture: paths and inline content are untrusted; sizes are capped
//! at [`MAX_ATTACHMENT_BYTES`] and an optional root confines file access.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod codec;
pub mod digest;
pub mod payload;
pub mod sink;
pub mod source;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codec::AttachmentCodec;
pub use digest::sha256_hex;
pub use payload::AttachmentPayload;
pub use payload::InlineEncoding;
pub use payload::ResolvedAttachment;
pub use sink::FileSink;
pub use source::CodecError;
pub use source::FileSource;
pub use source::InlineSource;
pub use source::MAX_ATTACHMENT_BYTES;
