// crates/jira-bridge-broker/src/sink.rs
// ============================================================================
// Module: File Attachment Sink
// Description: Writes retrieved attachment bytes to local files.
// Purpose: Store attachments when the caller names an output path.
// Dependencies: std
// ============================================================================

//! ## Overview
//! `FileSink` writes whole attachments. When a root is configured the
//! destination's parent directory must resolve inside it.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::source::CodecError;

/// File-backed attachment sink.
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    /// Optional root directory confining writes.
    root: Option<PathBuf>,
}

impl FileSink {
    /// Creates a sink confined to the provided directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Creates a sink with no root restriction.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            root: None,
        }
    }

    /// Writes bytes to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Write`] when the destination is outside the root
    /// or the write fails.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> Result<u64, CodecError> {
        self.check_root(path)?;
        fs::write(path, bytes).map_err(|err| CodecError::Write(format!("{}: {err}", path.display())))?;
        Ok(u64::try_from(bytes.len()).unwrap_or(u64::MAX))
    }

    /// Fails when a root is configured and the destination resolves outside it.
    fn check_root(&self, path: &Path) -> Result<(), CodecError> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let root = fs::canonicalize(root).map_err(|err| CodecError::Write(err.to_string()))?;
        let resolved = fs::canonicalize(parent)
            .map_err(|err| CodecError::Write(format!("{}: {err}", parent.display())))?;
        if !resolved.starts_with(&root) {
            return Err(CodecError::Write(format!(
                "{} escapes the configured attachment root",
                path.display()
            )));
        }
        Ok(())
    }
}
