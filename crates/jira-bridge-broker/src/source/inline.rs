// crates/jira-bridge-broker/src/source/inline.rs
// ============================================================================
// Module: Inline Attachment Source
// Description: Decodes attachment content supplied inline by the caller.
// Purpose: Resolve inline-origin attachments.
// Dependencies: base64
// ============================================================================

//! ## Overview
//! `InlineSource` decodes caller-supplied content. `utf8` content is taken
//! verbatim; `base64` content is decoded with the standard alphabet after
//! stripping ASCII whitespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::payload::InlineEncoding;
use crate::payload::ResolvedAttachment;
use crate::source::CodecError;
use crate::source::enforce_max_bytes;

// ============================================================================
// SECTION: Inline Source
// ============================================================================

/// Inline attachment source.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineSource;

impl InlineSource {
    /// Creates a new inline source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decodes inline content into a resolved attachment.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encoding`] on malformed base64 and
    /// [`CodecError::TooLarge`] past the size cap.
    pub fn decode(
        &self,
        filename: &str,
        content: &str,
        encoding: InlineEncoding,
    ) -> Result<ResolvedAttachment, CodecError> {
        if filename.trim().is_empty() {
            return Err(CodecError::Encoding("attachment filename is empty".to_string()));
        }
        let bytes = match encoding {
            InlineEncoding::Utf8 => {
                enforce_max_bytes(content.len())?;
                content.as_bytes().to_vec()
            }
            InlineEncoding::Base64 => self.decode_base64(content)?,
        };
        Ok(ResolvedAttachment::new(filename, bytes))
    }

    /// Decodes standard base64, checking the estimated size before decoding.
    fn decode_base64(&self, encoded: &str) -> Result<Vec<u8>, CodecError> {
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        enforce_max_bytes(decoded_len_upper_bound(&compact))?;
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|err| CodecError::Encoding(format!("malformed base64: {err}")))?;
        enforce_max_bytes(bytes.len())?;
        Ok(bytes)
    }
}

/// Returns the decoded length of base64 text, net of trailing padding.
fn decoded_len_upper_bound(compact: &str) -> usize {
    let padding = compact.bytes().rev().take_while(|byte| *byte == b'=').count();
    compact.len().div_ceil(4).saturating_mul(3).saturating_sub(padding)
}
