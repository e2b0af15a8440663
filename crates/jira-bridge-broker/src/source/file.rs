// crates/jira-bridge-broker/src/source/file.rs
// ============================================================================
// Module: File Attachment Source
// Description: Reads attachment bytes from local files.
// Purpose: Resolve path-origin attachments.
// Dependencies: std
// ============================================================================

//! ## Overview
//! `FileSource` reads a whole local file. A root directory can be configured
//! to fail closed on paths outside it.
//! Security posture: treats file paths as untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::payload::ResolvedAttachment;
use crate::source::CodecError;
use crate::source::MAX_ATTACHMENT_BYTES;
use crate::source::enforce_max_bytes;

// ============================================================================
// SECTION: File Source
// ============================================================================

/// File-backed attachment source.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    /// Optional root directory confining reads.
    root: Option<PathBuf>,
}

impl FileSource {
    /// Creates a file source confined to the provided directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Creates a file source with no root restriction.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            root: None,
        }
    }

    /// Reads a file into a resolved attachment named after its final component.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NotFound`] when the file is absent,
    /// [`CodecError::TooLarge`] past the size cap, and [`CodecError::Read`]
    /// for any other failure.
    pub fn read(&self, path: &Path) -> Result<ResolvedAttachment, CodecError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| CodecError::Read(format!("{} has no file name", path.display())))?;
        self.check_root(path)?;
        let bytes = read_with_limit(path)?;
        Ok(ResolvedAttachment::new(filename, bytes))
    }

    /// Fails when a root is configured and the path resolves outside it.
    fn check_root(&self, path: &Path) -> Result<(), CodecError> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let root = std::fs::canonicalize(root).map_err(|err| CodecError::Read(err.to_string()))?;
        let resolved = std::fs::canonicalize(path).map_err(|err| read_error(path, &err))?;
        if !resolved.starts_with(&root) {
            return Err(CodecError::Read(format!(
                "{} escapes the configured attachment root",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Reads a file, stopping one byte past the size cap.
fn read_with_limit(path: &Path) -> Result<Vec<u8>, CodecError> {
    let file = File::open(path).map_err(|err| read_error(path, &err))?;
    if file.metadata().map(|metadata| metadata.is_dir()).unwrap_or(false) {
        return Err(CodecError::Read(format!("{} is a directory", path.display())));
    }
    let limit = u64::try_from(MAX_ATTACHMENT_BYTES).unwrap_or(u64::MAX).saturating_add(1);
    let mut limited = file.take(limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(|err| read_error(path, &err))?;
    enforce_max_bytes(bytes.len())?;
    Ok(bytes)
}

/// Maps an I/O failure on a source path.
fn read_error(path: &Path, err: &io::Error) -> CodecError {
    if err.kind() == ErrorKind::NotFound {
        CodecError::NotFound(path.display().to_string())
    } else {
        CodecError::Read(format!("{}: {err}", path.display()))
    }
}
